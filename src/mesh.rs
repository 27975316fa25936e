//! Mesh vertex data consumed by mesh emitter shapes.
//!
//! [`MeshData`] is a plain container over the vertex attributes mesh
//! emission needs: positions (required), normals (optional, float or
//! packed unsigned-normalized), blend indices/weights (required only for
//! skinned emission) and a triangle index list. Shapes hold the mesh
//! through an `Arc`, so the buffers outlive any sampler built over them.

use glam::Vec3;

use crate::error::ShapeError;

/// Vertex normals in either float or packed unsigned-normalized form.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshNormals {
    /// Three floats per vertex.
    Float(Vec<Vec3>),
    /// Four bytes per vertex; each of x/y/z maps `[0, 255]` to `[-1, 1]`,
    /// the fourth byte is padding.
    Unorm(Vec<[u8; 4]>),
}

impl MeshNormals {
    fn len(&self) -> usize {
        match self {
            MeshNormals::Float(normals) => normals.len(),
            MeshNormals::Unorm(normals) => normals.len(),
        }
    }

    fn get(&self, index: usize) -> Vec3 {
        match self {
            MeshNormals::Float(normals) => normals[index],
            MeshNormals::Unorm(normals) => {
                let [x, y, z, _] = normals[index];
                Vec3::new(unorm_byte(x), unorm_byte(y), unorm_byte(z))
            }
        }
    }
}

#[inline]
fn unorm_byte(byte: u8) -> f32 {
    byte as f32 / 255.0 * 2.0 - 1.0
}

/// Mesh vertex and index data.
///
/// All per-vertex arrays that are present must match `positions` in
/// length; `indices` is a triangle list (every three entries form one
/// triangle). Consistency is checked when a mesh emitter shape is built,
/// not on every access.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions. Required, non-empty.
    pub positions: Vec<Vec3>,
    /// Vertex normals. Optional; absent normals read as zero.
    pub normals: Option<MeshNormals>,
    /// Four bone indices per vertex. Required only for skinned emission.
    pub bone_indices: Option<Vec<[u8; 4]>>,
    /// Four bone weights per vertex. Required only for skinned emission.
    pub bone_weights: Option<Vec<[f32; 4]>>,
    /// Triangle index list.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of whole triangles in the index list.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Normal for a vertex; zero when the mesh carries no normals.
    pub fn normal(&self, index: usize) -> Vec3 {
        match &self.normals {
            Some(normals) => normals.get(index),
            None => Vec3::ZERO,
        }
    }

    /// Check the buffer consistency mesh emission relies on.
    ///
    /// `skinned` additionally requires blend indices and weights.
    pub(crate) fn validate(&self, skinned: bool) -> Result<(), ShapeError> {
        let vertex_count = self.positions.len();
        if vertex_count == 0 {
            return Err(ShapeError::EmptyMesh);
        }

        if let Some(normals) = &self.normals {
            if normals.len() != vertex_count {
                return Err(ShapeError::NormalCountMismatch {
                    expected: vertex_count,
                    actual: normals.len(),
                });
            }
        }

        for &index in &self.indices {
            if index as usize >= vertex_count {
                return Err(ShapeError::IndexOutOfRange {
                    index,
                    vertex_count,
                });
            }
        }

        if skinned {
            let indices = self
                .bone_indices
                .as_ref()
                .ok_or(ShapeError::MissingBoneIndices)?;
            if indices.len() != vertex_count {
                return Err(ShapeError::BoneAttributeCountMismatch {
                    expected: vertex_count,
                    actual: indices.len(),
                });
            }
            let weights = self
                .bone_weights
                .as_ref()
                .ok_or(ShapeError::MissingBoneWeights)?;
            if weights.len() != vertex_count {
                return Err(ShapeError::BoneAttributeCountMismatch {
                    expected: vertex_count,
                    actual: weights.len(),
                });
            }
        }

        Ok(())
    }
}
