//! Benchmarks for spawn sampling and mesh table construction.
//!
//! Run with: `cargo bench`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;

use spawncore::{
    BoxEmitFrom, BoxShape, ConeEmitFrom, ConeShape, EmitterFrameState, EmitterShape, MeshData,
    MeshEmitFrom, MeshNormals, MeshShape, ParticleSet, Random, SphereShape,
};

/// A closed fan of `triangles` triangles around the origin.
fn fan_mesh(triangles: usize) -> Arc<MeshData> {
    let mut positions = vec![Vec3::ZERO];
    let mut indices = Vec::with_capacity(triangles * 3);
    for i in 0..=triangles {
        let angle = i as f32 / triangles as f32 * std::f32::consts::TAU;
        positions.push(Vec3::new(angle.cos(), angle.sin(), 0.0));
    }
    for i in 0..triangles {
        indices.extend_from_slice(&[0, (i + 1) as u32, (i + 2) as u32]);
    }
    let count = positions.len();
    Arc::new(MeshData {
        positions,
        normals: Some(MeshNormals::Float(vec![Vec3::Z; count])),
        indices,
        ..Default::default()
    })
}

fn bench_primitive_spawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_spawn");

    let shapes = [
        ("sphere_surface", EmitterShape::from(SphereShape { radius: 1.0, thickness: 0.0 })),
        ("sphere_volume", EmitterShape::from(SphereShape { radius: 1.0, thickness: 1.0 })),
        ("cone_volume", EmitterShape::from(ConeShape {
            emit_from: ConeEmitFrom::Volume,
            thickness: 1.0,
            ..Default::default()
        })),
        ("box_surface", EmitterShape::from(BoxShape {
            emit_from: BoxEmitFrom::Surface,
            extents: Vec3::ONE,
        })),
    ];

    for (name, shape) in shapes {
        group.bench_function(name, |b| {
            let mut random = Random::new(1);
            let mut particles = ParticleSet::with_capacity(10_000);
            b.iter(|| {
                particles.clear();
                shape.spawn(
                    &mut random,
                    &mut particles,
                    10_000,
                    &EmitterFrameState::None,
                );
                black_box(particles.len())
            })
        });
    }

    group.finish();
}

fn bench_mesh_spawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_spawn");

    let mesh = fan_mesh(1024);
    for emit_from in [MeshEmitFrom::Vertex, MeshEmitFrom::Edge, MeshEmitFrom::Triangle] {
        let shape = EmitterShape::static_mesh(MeshShape {
            emit_from,
            mesh: mesh.clone(),
        })
        .unwrap();
        group.bench_function(format!("{:?}", emit_from).to_lowercase(), |b| {
            let mut random = Random::new(2);
            let mut particles = ParticleSet::with_capacity(10_000);
            b.iter(|| {
                particles.clear();
                shape.spawn(
                    &mut random,
                    &mut particles,
                    10_000,
                    &EmitterFrameState::None,
                );
                black_box(particles.len())
            })
        });
    }

    group.finish();
}

fn bench_mesh_table_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_table_build");

    for triangles in [64usize, 1024, 16_384] {
        let mesh = fan_mesh(triangles);
        group.bench_with_input(
            BenchmarkId::new("triangle_table", triangles),
            &mesh,
            |b, mesh| {
                b.iter(|| {
                    black_box(
                        EmitterShape::static_mesh(MeshShape {
                            emit_from: MeshEmitFrom::Triangle,
                            mesh: mesh.clone(),
                        })
                        .unwrap(),
                    )
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("edge_table", triangles),
            &mesh,
            |b, mesh| {
                b.iter(|| {
                    black_box(
                        EmitterShape::static_mesh(MeshShape {
                            emit_from: MeshEmitFrom::Edge,
                            mesh: mesh.clone(),
                        })
                        .unwrap(),
                    )
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_primitive_spawn,
    bench_mesh_spawn,
    bench_mesh_table_build,
);
criterion_main!(benches);
