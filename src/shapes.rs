//! Emitter shapes: geometric samplers for particle spawn data.
//!
//! An emitter shape turns random input into spawn positions and normals.
//! The shape set is closed: every kind is a variant of [`EmitterShape`]
//! and dispatch is a single `match` inside [`EmitterShape::spawn`].
//!
//! # Shape Kinds
//!
//! | Kind | Emits from |
//! |------|------------|
//! | [`ConeShape`] | Cone base or volume, restricted by arc and thickness |
//! | [`SphereShape`] | Sphere surface or volume shell |
//! | [`HemisphereShape`] | Upper half of a sphere |
//! | [`BoxShape`] | Box volume, surface or edges |
//! | [`LineShape`] | Line segment along the X axis |
//! | [`CircleShape`] | Circle edge or surface, restricted by arc |
//! | [`RectShape`] | Axis-aligned rectangle in the XY plane |
//! | [`MeshShape`] | Mesh vertices, edges or triangles (static or skinned) |
//!
//! # Thickness
//!
//! Round shapes take a `thickness` in `[0, 1]`: 0 emits only from the
//! boundary, 1 fills the whole measure uniformly (sqrt scaling for areas,
//! cube-root scaling for volumes), in-between values use an outer shell.
//!
//! # Example
//!
//! ```ignore
//! let shape = EmitterShape::from(SphereShape { radius: 2.0, thickness: 0.0 });
//! shape.spawn(&mut random, &mut particles, 128, &EmitterFrameState::None);
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use log::{debug, warn};

use crate::error::ShapeError;
use crate::mesh::MeshData;
use crate::particles::{EmitterFrameState, ParticleSet};
use crate::random::Random;

// ============================================================================
// Shape descriptors
// ============================================================================

/// Where on a cone particles are emitted from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConeEmitFrom {
    /// Emit only from the cone base disk.
    #[default]
    Base,
    /// Emit from the entire cone volume.
    Volume,
}

/// Cone emitter shape parameters.
///
/// Particles spawn on the base disk (or inside the volume) and get normals
/// pointing along the cone's slant, so the normal doubles as an emission
/// direction for fountains and jets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConeShape {
    /// Which part of the cone emits.
    pub emit_from: ConeEmitFrom,
    /// Radius of the cone base.
    pub radius: f32,
    /// Half-angle between the cone axis and its slant, in degrees.
    pub angle_deg: f32,
    /// Length of the cone. Ignored when emitting from the base.
    pub length: f32,
    /// 0 emits from the base edge only, 1 from the full base disk.
    pub thickness: f32,
    /// Angular portion of the base to emit from, in degrees.
    pub arc_deg: f32,
}

impl Default for ConeShape {
    fn default() -> Self {
        Self {
            emit_from: ConeEmitFrom::Base,
            radius: 1.0,
            angle_deg: 45.0,
            length: 1.0,
            thickness: 0.0,
            arc_deg: 360.0,
        }
    }
}

/// Sphere emitter shape parameters.
///
/// Normals point radially outward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SphereShape {
    /// Radius of the sphere.
    pub radius: f32,
    /// 0 emits from the surface only, 1 from the full volume.
    pub thickness: f32,
}

/// Hemisphere emitter shape parameters.
///
/// Same sampling as [`SphereShape`], restricted to the positive-Z half.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HemisphereShape {
    /// Radius of the hemisphere.
    pub radius: f32,
    /// 0 emits from the surface only, 1 from the full volume.
    pub thickness: f32,
}

/// Which part of a box particles are emitted from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxEmitFrom {
    /// Emit from the entire box volume.
    #[default]
    Volume,
    /// Emit from the box surface, faces weighted by area.
    Surface,
    /// Emit from the twelve box edges, picked uniformly.
    Edge,
}

/// Axis-aligned box emitter shape parameters.
///
/// Every box particle gets a +Z normal regardless of which face or edge it
/// spawned on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxShape {
    /// Which part of the box emits.
    pub emit_from: BoxEmitFrom,
    /// Half-extents of the box along each axis.
    pub extents: Vec3,
}

impl Default for BoxShape {
    fn default() -> Self {
        Self {
            emit_from: BoxEmitFrom::Volume,
            extents: Vec3::ONE,
        }
    }
}

/// Line segment emitter shape parameters.
///
/// Particles spawn uniformly along `[0, length]` on the X axis with a zero
/// normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineShape {
    /// Length of the line.
    pub length: f32,
}

impl Default for LineShape {
    fn default() -> Self {
        Self { length: 1.0 }
    }
}

/// Circle emitter shape parameters.
///
/// The circle lies in the XY plane; normals point outward in that plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleShape {
    /// Radius of the circle.
    pub radius: f32,
    /// 0 emits from the edge only, 1 from the full surface.
    pub thickness: f32,
    /// Angular portion of the circle to emit from, in degrees.
    pub arc_deg: f32,
}

impl Default for CircleShape {
    fn default() -> Self {
        Self {
            radius: 1.0,
            thickness: 0.0,
            arc_deg: 360.0,
        }
    }
}

/// Rectangle emitter shape parameters.
///
/// The rectangle lies in the XY plane; normals are +Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectShape {
    /// Half-extents of the rectangle.
    pub extents: glam::Vec2,
}

impl Default for RectShape {
    fn default() -> Self {
        Self {
            extents: glam::Vec2::ONE,
        }
    }
}

/// Which part of a mesh particles are emitted from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeshEmitFrom {
    /// Emit from mesh vertices, picked uniformly.
    Vertex,
    /// Emit from mesh edges, weighted by edge length.
    Edge,
    /// Emit from mesh triangles, weighted by triangle area.
    #[default]
    Triangle,
}

/// Mesh emitter shape parameters.
///
/// The mesh must carry positions; normals are optional and inherited when
/// present. Skinned emission additionally requires blend indices and
/// weights (see [`EmitterShape::skinned_mesh`]).
#[derive(Clone, Debug)]
pub struct MeshShape {
    /// Which part of the mesh emits.
    pub emit_from: MeshEmitFrom,
    /// Shared mesh data. The shape keeps a handle, so the buffers stay
    /// alive as long as the shape does.
    pub mesh: Arc<MeshData>,
}

// ============================================================================
// The shape enum
// ============================================================================

/// A particle emitter shape.
///
/// Shapes are immutable after construction and hold no spawn state, so one
/// instance may be shared across threads as long as each caller brings its
/// own [`Random`].
#[derive(Clone, Debug)]
pub enum EmitterShape {
    /// Cone base or volume.
    Cone(ConeShape),
    /// Sphere surface or volume shell.
    Sphere(SphereShape),
    /// Hemisphere surface or volume shell.
    Hemisphere(HemisphereShape),
    /// Box volume, surface or edges.
    Box(BoxShape),
    /// Line segment.
    Line(LineShape),
    /// Circle edge or surface.
    Circle(CircleShape),
    /// Rectangle surface.
    Rect(RectShape),
    /// Non-animated mesh.
    StaticMesh(MeshSampler),
    /// Skinned mesh; positions and normals pass through the per-vertex
    /// blend matrix built from the frame state's bones.
    SkinnedMesh(MeshSampler),
}

impl EmitterShape {
    /// Build a static mesh shape.
    ///
    /// Fails when the mesh has no vertices, inconsistent buffers, or (for
    /// edge/triangle emission) no usable triangle list.
    pub fn static_mesh(desc: MeshShape) -> Result<Self, ShapeError> {
        Ok(EmitterShape::StaticMesh(MeshSampler::new(desc, false)?))
    }

    /// Build a skinned mesh shape.
    ///
    /// Same requirements as [`EmitterShape::static_mesh`] plus blend
    /// indices and blend weights on every vertex.
    pub fn skinned_mesh(desc: MeshShape) -> Result<Self, ShapeError> {
        Ok(EmitterShape::SkinnedMesh(MeshSampler::new(desc, true)?))
    }

    /// Append `count` particles to `particles`, writing position and
    /// normal for each.
    ///
    /// `state` is only read by skinned mesh shapes; without bone matrices
    /// they fall back to the unskinned result.
    pub fn spawn(
        &self,
        random: &mut Random,
        particles: &mut ParticleSet,
        count: u32,
        state: &EmitterFrameState<'_>,
    ) {
        let range = particles.alloc(count as usize);
        for index in range {
            let (position, normal) = match self {
                EmitterShape::Cone(desc) => sample_cone(desc, random),
                EmitterShape::Sphere(desc) => sample_shell(desc.radius, desc.thickness, random),
                EmitterShape::Hemisphere(desc) => {
                    let (mut position, mut normal) =
                        sample_shell(desc.radius, desc.thickness, random);
                    if normal.z < 0.0 {
                        position.z = -position.z;
                        normal.z = -normal.z;
                    }
                    (position, normal)
                }
                EmitterShape::Box(desc) => sample_box(desc, random),
                EmitterShape::Line(desc) => {
                    let x = random.range_f32(0.0, desc.length.max(0.0));
                    (Vec3::new(x, 0.0, 0.0), Vec3::ZERO)
                }
                EmitterShape::Circle(desc) => sample_circle(desc, random),
                EmitterShape::Rect(desc) => {
                    let extents = desc.extents.abs();
                    let position = Vec3::new(
                        random.range_f32(-extents.x, extents.x),
                        random.range_f32(-extents.y, extents.y),
                        0.0,
                    );
                    (position, Vec3::Z)
                }
                EmitterShape::StaticMesh(sampler) => {
                    sampler.sample(random, &EmitterFrameState::None)
                }
                EmitterShape::SkinnedMesh(sampler) => sampler.sample(random, state),
            };
            particles.positions_mut()[index] = position;
            particles.normals_mut()[index] = normal;
        }
    }
}

impl From<ConeShape> for EmitterShape {
    fn from(desc: ConeShape) -> Self {
        EmitterShape::Cone(desc)
    }
}

impl From<SphereShape> for EmitterShape {
    fn from(desc: SphereShape) -> Self {
        EmitterShape::Sphere(desc)
    }
}

impl From<HemisphereShape> for EmitterShape {
    fn from(desc: HemisphereShape) -> Self {
        EmitterShape::Hemisphere(desc)
    }
}

impl From<BoxShape> for EmitterShape {
    fn from(desc: BoxShape) -> Self {
        EmitterShape::Box(desc)
    }
}

impl From<LineShape> for EmitterShape {
    fn from(desc: LineShape) -> Self {
        EmitterShape::Line(desc)
    }
}

impl From<CircleShape> for EmitterShape {
    fn from(desc: CircleShape) -> Self {
        EmitterShape::Circle(desc)
    }
}

impl From<RectShape> for EmitterShape {
    fn from(desc: RectShape) -> Self {
        EmitterShape::Rect(desc)
    }
}

// ============================================================================
// Primitive sampling
// ============================================================================

#[inline]
fn lerp(min: f32, max: f32, t: f32) -> f32 {
    (1.0 - t) * min + t * max
}

/// Arc parameter in radians, clamped to `[0°, 360°]`.
#[inline]
fn arc_radians(arc_deg: f32) -> f32 {
    arc_deg.clamp(0.0, 360.0).to_radians()
}

fn sample_cone(desc: &ConeShape, random: &mut Random) -> (Vec3, Vec3) {
    let arc = arc_radians(desc.arc_deg);
    let thickness = desc.thickness.clamp(0.0, 1.0);

    let angle = random.range_f32(-arc * 0.5, arc * 0.5);
    // sqrt keeps areal density uniform across the base disk.
    let radial = lerp(1.0 - thickness, 1.0, random.unit_f32()).max(0.0).sqrt();
    let outward = Vec3::new(angle.cos(), angle.sin(), 0.0);

    let (sin_half, cos_half) = desc.angle_deg.to_radians().sin_cos();
    // Tilt scales with the radial offset: center particles leave along the
    // axis, edge particles along the slant.
    let normal = (outward * sin_half * radial + Vec3::Z * cos_half).normalize_or_zero();

    let mut position = outward * radial * desc.radius.max(0.0);
    if desc.emit_from == ConeEmitFrom::Volume {
        let length = desc.length.max(0.0);
        let depth = random.range_f32(0.0, length);
        if length > 0.0 {
            // Cross sections shrink linearly from the base radius to the apex.
            position *= 1.0 - depth / length;
        }
        position.z = depth;
    }
    (position, normal)
}

/// Shared sphere/hemisphere shell sampling.
///
/// Cube-root scaling keeps volumetric density uniform through the shell
/// between `radius * (1 - thickness)` and `radius`.
fn sample_shell(radius: f32, thickness: f32, random: &mut Random) -> (Vec3, Vec3) {
    let thickness = thickness.clamp(0.0, 1.0);
    let direction = random.unit_vector();
    let inner = (1.0 - thickness).powi(3);
    let radial = lerp(inner, 1.0, random.unit_f32()).max(0.0).cbrt();
    (direction * radial * radius.max(0.0), direction)
}

fn sample_box(desc: &BoxShape, random: &mut Random) -> (Vec3, Vec3) {
    let extents = desc.extents.abs();
    let position = match desc.emit_from {
        BoxEmitFrom::Volume => Vec3::new(
            random.range_f32(-extents.x, extents.x),
            random.range_f32(-extents.y, extents.y),
            random.range_f32(-extents.z, extents.z),
        ),
        BoxEmitFrom::Surface => {
            // Two faces per axis, each weighted by its area.
            let face_areas = [
                extents.y * extents.z,
                extents.y * extents.z,
                extents.x * extents.z,
                extents.x * extents.z,
                extents.x * extents.y,
                extents.x * extents.y,
            ];
            let face = pick_weighted(&face_areas, random);
            let axis = face / 2;
            let sign = if face % 2 == 0 { 1.0 } else { -1.0 };
            let mut position = Vec3::new(
                random.range_f32(-extents.x, extents.x),
                random.range_f32(-extents.y, extents.y),
                random.range_f32(-extents.z, extents.z),
            );
            position[axis] = sign * extents[axis];
            position
        }
        BoxEmitFrom::Edge => {
            // Four edges run along each axis; pick one of the twelve
            // uniformly, then slide along it.
            let edge = random.range_u32(0, 12);
            let axis = (edge / 4) as usize;
            let (fixed_a, fixed_b) = other_axes(axis);
            let sign_a = if edge & 1 == 0 { 1.0 } else { -1.0 };
            let sign_b = if edge & 2 == 0 { 1.0 } else { -1.0 };
            let mut position = Vec3::ZERO;
            position[axis] = random.range_f32(-extents[axis], extents[axis]);
            position[fixed_a] = sign_a * extents[fixed_a];
            position[fixed_b] = sign_b * extents[fixed_b];
            position
        }
    };
    // Box particles always get a +Z normal, whichever face they came from.
    (position, Vec3::Z)
}

#[inline]
fn other_axes(axis: usize) -> (usize, usize) {
    match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

fn sample_circle(desc: &CircleShape, random: &mut Random) -> (Vec3, Vec3) {
    let arc = arc_radians(desc.arc_deg);
    let thickness = desc.thickness.clamp(0.0, 1.0);

    let angle = random.range_f32(-arc * 0.5, arc * 0.5);
    let inner = (1.0 - thickness).powi(2);
    let radial = lerp(inner, 1.0, random.unit_f32()).max(0.0).sqrt();
    let outward = Vec3::new(angle.cos(), angle.sin(), 0.0);
    (outward * radial * desc.radius.max(0.0), outward)
}

/// Pick an index with probability proportional to its weight.
///
/// All-zero weights fall back to index 0.
fn pick_weighted(weights: &[f32], random: &mut Random) -> usize {
    let total: f32 = weights.iter().sum();
    if total <= 0.0 {
        return 0;
    }
    let mut target = random.unit_f32() * total;
    for (index, weight) in weights.iter().enumerate() {
        target -= weight;
        if target <= 0.0 {
            return index;
        }
    }
    weights.len() - 1
}

// ============================================================================
// Mesh sampling
// ============================================================================

/// Up to three mesh vertices with interpolation weights.
struct SampledVertices {
    corners: [(usize, f32); 3],
    count: usize,
}

/// Precomputed sampling tables over mesh data.
///
/// Built once when the shape is constructed and read-only afterwards.
/// Triangle emission keeps a cumulative-area table, edge emission a
/// cumulative-length table over deduplicated edges, vertex emission needs
/// no table at all. Selection is a binary search over the cumulative
/// weights.
#[derive(Clone, Debug)]
pub struct MeshSampler {
    mesh: Arc<MeshData>,
    emit_from: MeshEmitFrom,
    /// Cumulative triangle areas or edge lengths; empty for vertex emission.
    cumulative: Vec<f32>,
    /// Vertex index pairs, parallel to `cumulative` for edge emission.
    edges: Vec<[u32; 2]>,
    skinned: bool,
}

impl MeshSampler {
    fn new(desc: MeshShape, skinned: bool) -> Result<Self, ShapeError> {
        desc.mesh.validate(skinned)?;

        let mut cumulative = Vec::new();
        let mut edges = Vec::new();
        match desc.emit_from {
            MeshEmitFrom::Vertex => {}
            MeshEmitFrom::Triangle => {
                if desc.mesh.triangle_count() == 0 {
                    return Err(ShapeError::NoTriangles);
                }
                let mut total = 0.0f32;
                let mut degenerate = 0usize;
                for triangle in desc.mesh.indices.chunks_exact(3) {
                    let a = desc.mesh.positions[triangle[0] as usize];
                    let b = desc.mesh.positions[triangle[1] as usize];
                    let c = desc.mesh.positions[triangle[2] as usize];
                    let area = (b - a).cross(c - a).length() * 0.5;
                    if area <= 0.0 {
                        degenerate += 1;
                    }
                    total += area;
                    cumulative.push(total);
                }
                if total <= 0.0 {
                    return Err(ShapeError::DegenerateGeometry);
                }
                if degenerate > 0 {
                    warn!(
                        "mesh sampler: {} zero-area triangles get no spawn weight",
                        degenerate
                    );
                }
                debug!(
                    "mesh sampler: {} triangles, total area {}",
                    cumulative.len(),
                    total
                );
            }
            MeshEmitFrom::Edge => {
                if desc.mesh.triangle_count() == 0 {
                    return Err(ShapeError::NoTriangles);
                }
                let mut unique = BTreeSet::new();
                for triangle in desc.mesh.indices.chunks_exact(3) {
                    for (from, to) in [
                        (triangle[0], triangle[1]),
                        (triangle[1], triangle[2]),
                        (triangle[2], triangle[0]),
                    ] {
                        unique.insert([from.min(to), from.max(to)]);
                    }
                }
                let mut total = 0.0f32;
                let mut degenerate = 0usize;
                for edge in unique {
                    let a = desc.mesh.positions[edge[0] as usize];
                    let b = desc.mesh.positions[edge[1] as usize];
                    let length = (b - a).length();
                    if length <= 0.0 {
                        degenerate += 1;
                    }
                    total += length;
                    cumulative.push(total);
                    edges.push(edge);
                }
                if total <= 0.0 {
                    return Err(ShapeError::DegenerateGeometry);
                }
                if degenerate > 0 {
                    warn!(
                        "mesh sampler: {} zero-length edges get no spawn weight",
                        degenerate
                    );
                }
                debug!(
                    "mesh sampler: {} edges, total length {}",
                    edges.len(),
                    total
                );
            }
        }

        Ok(Self {
            mesh: desc.mesh,
            emit_from: desc.emit_from,
            cumulative,
            edges,
            skinned,
        })
    }

    /// The mesh this sampler reads from.
    pub fn mesh(&self) -> &Arc<MeshData> {
        &self.mesh
    }

    /// Which part of the mesh this sampler emits from.
    pub fn emit_from(&self) -> MeshEmitFrom {
        self.emit_from
    }

    /// Binary search the cumulative table for a weighted pick.
    fn pick(&self, random: &mut Random) -> usize {
        let total = self.cumulative.last().copied().unwrap_or(0.0);
        let target = random.unit_f32() * total;
        self.cumulative
            .partition_point(|&c| c <= target)
            .min(self.cumulative.len().saturating_sub(1))
    }

    fn sample_vertices(&self, random: &mut Random) -> SampledVertices {
        match self.emit_from {
            MeshEmitFrom::Vertex => {
                let vertex = random.range_u32(0, self.mesh.vertex_count() as u32) as usize;
                SampledVertices {
                    corners: [(vertex, 1.0), (0, 0.0), (0, 0.0)],
                    count: 1,
                }
            }
            MeshEmitFrom::Edge => {
                let edge = self.edges[self.pick(random)];
                let t = random.unit_f32();
                SampledVertices {
                    corners: [
                        (edge[0] as usize, 1.0 - t),
                        (edge[1] as usize, t),
                        (0, 0.0),
                    ],
                    count: 2,
                }
            }
            MeshEmitFrom::Triangle => {
                let triangle = self.pick(random);
                let indices = &self.mesh.indices[triangle * 3..triangle * 3 + 3];
                let mut u = random.unit_f32();
                let mut v = random.unit_f32();
                // Fold samples outside the triangle back in, keeping the
                // barycentric distribution uniform.
                if u + v > 1.0 {
                    u = 1.0 - u;
                    v = 1.0 - v;
                }
                SampledVertices {
                    corners: [
                        (indices[0] as usize, 1.0 - u - v),
                        (indices[1] as usize, u),
                        (indices[2] as usize, v),
                    ],
                    count: 3,
                }
            }
        }
    }

    /// Sample one spawn position and normal.
    fn sample(&self, random: &mut Random, state: &EmitterFrameState<'_>) -> (Vec3, Vec3) {
        let sampled = self.sample_vertices(random);
        let bones = state.bones();

        let mut position = Vec3::ZERO;
        let mut normal = Vec3::ZERO;
        for &(vertex, weight) in &sampled.corners[..sampled.count] {
            let mut corner_position = self.mesh.positions[vertex];
            let mut corner_normal = self.mesh.normal(vertex);
            if self.skinned && !bones.is_empty() {
                let blend = self.blend_matrix(bones, vertex);
                corner_position = blend.transform_point3(corner_position);
                corner_normal = blend.transform_vector3(corner_normal);
            }
            position += corner_position * weight;
            normal += corner_normal * weight;
        }
        (position, normal.normalize_or_zero())
    }

    /// Blend matrix for a vertex: the weight-normalized sum of its bone
    /// matrices. Out-of-range bone indices clamp to the last bone; a
    /// vertex with no positive weights blends as identity.
    fn blend_matrix(&self, bones: &[Mat4], vertex: usize) -> Mat4 {
        // validate() guarantees both attributes exist for skinned samplers.
        let indices = match &self.mesh.bone_indices {
            Some(indices) => indices[vertex],
            None => return Mat4::IDENTITY,
        };
        let weights = match &self.mesh.bone_weights {
            Some(weights) => weights[vertex],
            None => return Mat4::IDENTITY,
        };

        let mut blended = Mat4::ZERO;
        let mut total = 0.0f32;
        for bone in 0..4 {
            let weight = weights[bone];
            if weight <= 0.0 {
                continue;
            }
            let index = (indices[bone] as usize).min(bones.len() - 1);
            blended += bones[index] * weight;
            total += weight;
        }
        if total <= 0.0 {
            Mat4::IDENTITY
        } else {
            blended * (1.0 / total)
        }
    }
}
