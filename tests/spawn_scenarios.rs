//! Integration tests for spawn sampling.
//!
//! These tests drive the public API the way an engine would: build shapes
//! and emitters, spawn particles, and check the geometric and statistical
//! guarantees the samplers make.

use std::sync::Arc;

use spawncore::{
    BoxEmitFrom, BoxShape, CircleShape, ColorDistribution, ConeShape, CurveKey, EmitterFrameState,
    EmitterShape, FloatCurve, FloatDistribution, Mat4, MeshData, MeshEmitFrom, MeshNormals,
    MeshShape, ParticleEmitter, ParticleSet, ParticleSystem, Random, Rgba, SphereShape, Vec3,
};

fn spawn(shape: &EmitterShape, count: u32, seed: u64) -> ParticleSet {
    let mut random = Random::new(seed);
    let mut particles = ParticleSet::new();
    shape.spawn(&mut random, &mut particles, count, &EmitterFrameState::None);
    particles
}

// ============================================================================
// Shape Geometry Scenarios
// ============================================================================

#[test]
fn test_sphere_shell_scenario() {
    // radius 2, thickness 0: every one of 10k samples sits on the surface.
    let shape = EmitterShape::from(SphereShape {
        radius: 2.0,
        thickness: 0.0,
    });
    let particles = spawn(&shape, 10_000, 41);
    assert_eq!(particles.len(), 10_000);

    let mut min_distance = f32::MAX;
    let mut max_distance = f32::MIN;
    for position in particles.positions() {
        min_distance = min_distance.min(position.length());
        max_distance = max_distance.max(position.length());
    }
    assert!(max_distance <= 2.0 + 1e-3);
    assert!(min_distance >= 2.0 - 1e-3);
}

#[test]
fn test_box_edge_scenario() {
    // Edge emission pins exactly two coordinates to the extents.
    let shape = EmitterShape::from(BoxShape {
        emit_from: BoxEmitFrom::Edge,
        extents: Vec3::ONE,
    });
    for position in spawn(&shape, 1, 42).positions() {
        let coords = [position.x, position.y, position.z];
        let pinned = coords.iter().filter(|c| (c.abs() - 1.0).abs() < 1e-6).count();
        assert_eq!(pinned, 2);
        assert!(coords.iter().all(|c| c.abs() <= 1.0 + 1e-6));
    }
}

#[test]
fn test_volume_sampling_stays_in_bounds() {
    // thickness 1 fills the volume and never escapes it.
    let shape = EmitterShape::from(SphereShape {
        radius: 3.0,
        thickness: 1.0,
    });
    let particles = spawn(&shape, 5000, 43);
    assert!(particles
        .positions()
        .iter()
        .all(|p| p.length() <= 3.0 + 1e-4));
    // A full volume should also reach well inside.
    assert!(particles.positions().iter().any(|p| p.length() < 1.5));
}

#[test]
fn test_cone_and_circle_arc_restriction() {
    let half_arc = 30.0f32.to_radians();
    for shape in [
        EmitterShape::from(ConeShape {
            arc_deg: 60.0,
            thickness: 1.0,
            ..Default::default()
        }),
        EmitterShape::from(CircleShape {
            arc_deg: 60.0,
            thickness: 1.0,
            ..Default::default()
        }),
    ] {
        for position in spawn(&shape, 2000, 44).positions() {
            let planar = Vec3::new(position.x, position.y, 0.0);
            if planar.length() > 1e-3 {
                let angle = position.y.atan2(position.x);
                assert!(angle.abs() <= half_arc + 1e-4);
            }
        }
    }
}

// ============================================================================
// Mesh Scenarios
// ============================================================================

fn skinned_triangle() -> Arc<MeshData> {
    Arc::new(MeshData {
        positions: vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        normals: Some(MeshNormals::Float(vec![Vec3::Z; 3])),
        bone_indices: Some(vec![[0, 1, 0, 0]; 3]),
        bone_weights: Some(vec![[0.5, 0.5, 0.0, 0.0]; 3]),
        indices: vec![0, 1, 2],
    })
}

#[test]
fn test_single_triangle_containment() {
    // 1000 samples over one triangle all land inside its convex hull.
    let shape = EmitterShape::static_mesh(MeshShape {
        emit_from: MeshEmitFrom::Triangle,
        mesh: skinned_triangle(),
    })
    .unwrap();
    for position in spawn(&shape, 1000, 45).positions() {
        assert!(position.z.abs() < 1e-6);
        let u = position.x;
        let v = position.y;
        let w = 1.0 - u - v;
        for coordinate in [u, v, w] {
            assert!((-1e-5..=1.0 + 1e-5).contains(&coordinate));
        }
    }
}

#[test]
fn test_skinned_identity_matches_static() {
    let mesh = skinned_triangle();
    let static_shape = EmitterShape::static_mesh(MeshShape {
        emit_from: MeshEmitFrom::Triangle,
        mesh: mesh.clone(),
    })
    .unwrap();
    let skinned_shape = EmitterShape::skinned_mesh(MeshShape {
        emit_from: MeshEmitFrom::Triangle,
        mesh,
    })
    .unwrap();

    let bones = [Mat4::IDENTITY; 2];
    let static_particles = spawn(&static_shape, 500, 46);
    let mut random = Random::new(46);
    let mut skinned_particles = ParticleSet::new();
    skinned_shape.spawn(
        &mut random,
        &mut skinned_particles,
        500,
        &EmitterFrameState::SkinnedMeshBones(&bones),
    );

    for index in 0..static_particles.len() {
        let position_delta =
            static_particles.positions()[index] - skinned_particles.positions()[index];
        let normal_delta = static_particles.normals()[index] - skinned_particles.normals()[index];
        assert!(position_delta.length() < 1e-5);
        assert!(normal_delta.length() < 1e-5);
    }
}

#[test]
fn test_skinned_bones_deform_samples() {
    let shape = EmitterShape::skinned_mesh(MeshShape {
        emit_from: MeshEmitFrom::Triangle,
        mesh: skinned_triangle(),
    })
    .unwrap();

    // Both bones translate up by 2, each with weight 0.5.
    let bones = [Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)); 2];
    let mut random = Random::new(47);
    let mut particles = ParticleSet::new();
    shape.spawn(
        &mut random,
        &mut particles,
        200,
        &EmitterFrameState::SkinnedMeshBones(&bones),
    );
    for position in particles.positions() {
        assert!((position.z - 2.0).abs() < 1e-5);
    }
}

// ============================================================================
// Distribution Scenarios
// ============================================================================

#[test]
fn test_float_distribution_endpoints() {
    let dist = FloatDistribution::RandomRange {
        min: -4.0,
        max: 9.0,
    };
    assert_eq!(dist.evaluate(0.0, 0.0), -4.0);
    assert_eq!(dist.evaluate(7.0, 1.0), 9.0);
}

#[test]
fn test_color_distribution_endpoints_within_quantization() {
    let min = Rgba::from_channels(10, 90, 170, 255);
    let max = Rgba::from_channels(250, 20, 60, 128);
    let dist = ColorDistribution::RandomRange { min, max };
    assert_eq!(dist.evaluate(0.0, 0.0), min);
    assert_eq!(dist.evaluate(0.0, 1.0), max);
}

#[test]
fn test_curve_distribution_ignores_factor() {
    let dist = FloatDistribution::Curve(FloatCurve::new(vec![
        CurveKey {
            time: 0.0,
            value: 2.0,
        },
        CurveKey {
            time: 1.0,
            value: 8.0,
        },
    ]));
    let reference = dist.evaluate(0.3, 0.0);
    for factor in [0.25, 0.5, 0.75, 1.0] {
        assert_eq!(dist.evaluate(0.3, factor), reference);
    }
}

// ============================================================================
// Emitter / System Scenarios
// ============================================================================

#[test]
fn test_add_emitter_indices() {
    let mut system = ParticleSystem::new();
    assert_eq!(system.add_emitter(ParticleEmitter::new()), 0);
    assert_eq!(system.add_emitter(ParticleEmitter::new()), 1);
    assert_eq!(system.add_emitter(ParticleEmitter::new()), 2);
}

#[test]
fn test_system_update_spawns_initialized_particles() {
    let mut emitter = ParticleEmitter::with_shape(
        SphereShape {
            radius: 1.0,
            thickness: 0.0,
        }
        .into(),
    );
    emitter.rate = 100.0;
    emitter.initial_size = FloatDistribution::RandomRange { min: 0.5, max: 1.5 };
    emitter.initial_color = ColorDistribution::Constant(Rgba::from_channels(0, 255, 0, 255));

    let mut system = ParticleSystem::new();
    system.add_emitter(emitter);

    let mut random = Random::new(48);
    let mut particles = ParticleSet::new();
    for _ in 0..10 {
        system.update(0.1, &mut random, &mut particles, &EmitterFrameState::None);
    }

    // 100/s for one second.
    assert_eq!(particles.len(), 100);
    for index in 0..particles.len() {
        assert!((particles.positions()[index].length() - 1.0).abs() < 1e-3);
        let size = particles.sizes()[index];
        assert!((0.5..=1.5).contains(&size));
        assert_eq!(particles.colors()[index], Rgba::from_channels(0, 255, 0, 255));
    }
}

#[test]
fn test_same_seed_reproduces_spawns() {
    let shape = EmitterShape::from(ConeShape::default());
    let first = spawn(&shape, 256, 49);
    let second = spawn(&shape, 256, 49);
    assert_eq!(first.positions(), second.positions());
    assert_eq!(first.normals(), second.normals());
}
