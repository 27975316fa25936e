//! # Spawncore - Particle Spawn Sampling Engine
//!
//! CPU-side particle spawning with a small, composable API: emitter shapes
//! turn random input into spawn positions and normals, and value
//! distributions turn time plus a random factor into per-particle
//! attributes like color and size.
//!
//! ## Quick Start
//!
//! ```ignore
//! use spawncore::prelude::*;
//!
//! fn main() {
//!     let mut random = Random::new(42);
//!     let mut particles = ParticleSet::new();
//!
//!     let mut emitter = ParticleEmitter::with_shape(
//!         ConeShape {
//!             radius: 0.5,
//!             angle_deg: 30.0,
//!             ..Default::default()
//!         }
//!         .into(),
//!     );
//!     emitter.rate = 500.0;
//!     emitter.initial_color = ColorDistribution::RandomRange {
//!         min: Rgba::from_f32(1.0, 0.9, 0.3, 1.0),
//!         max: Rgba::from_f32(0.8, 0.2, 0.0, 1.0),
//!     };
//!
//!     let mut system = ParticleSystem::new();
//!     system.add_emitter(emitter);
//!
//!     // each simulation tick:
//!     system.update(dt, &mut random, &mut particles, &EmitterFrameState::None);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Shapes
//!
//! An [`EmitterShape`] is a stateless geometric sampler. Primitive shapes
//! are built straight from their parameter structs; mesh shapes precompute
//! weighted sampling tables and can fail on inconsistent mesh data:
//!
//! | Shape | Notes |
//! |-------|-------|
//! | [`ConeShape`] | Base or volume emission, arc + thickness control |
//! | [`SphereShape`] / [`HemisphereShape`] | Surface shell through full volume |
//! | [`BoxShape`] | Volume, area-weighted surface, or edges |
//! | [`LineShape`] / [`CircleShape`] / [`RectShape`] | Planar primitives |
//! | [`MeshShape`] | Vertex / edge / triangle emission, static or skinned |
//!
//! ### Distributions
//!
//! [`FloatDistribution`] and [`ColorDistribution`] share four forms:
//! constant, random range, curve, and random range between two curves.
//! Colors blend fixed-point with the factor quantized to 256 steps, so
//! color results are deterministic across platforms.
//!
//! ### Determinism
//!
//! All randomness flows through a caller-supplied [`Random`]. Seed one per
//! emitter or per system; the same seed replays the same spawn sequence,
//! and systems that do not share a generator can update on separate
//! threads.

mod color;
mod curve;
mod distribution;
mod emitter;
mod error;
mod mesh;
mod particles;
mod random;
mod shapes;

pub use bytemuck;
pub use color::{unorm_to_u8, Rgba};
pub use curve::{ColorGradient, CurveKey, FloatCurve, GradientKey};
pub use distribution::{ColorDistribution, FloatDistribution};
pub use emitter::{ParticleEmitter, ParticleSystem};
pub use error::ShapeError;
pub use glam::{Mat4, Vec2, Vec3};
pub use mesh::{MeshData, MeshNormals};
pub use particles::{EmitterFrameState, ParticleSet};
pub use random::Random;
pub use shapes::{
    BoxEmitFrom, BoxShape, CircleShape, ConeEmitFrom, ConeShape, EmitterShape, HemisphereShape,
    LineShape, MeshEmitFrom, MeshSampler, MeshShape, RectShape, SphereShape,
};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use spawncore::prelude::*;
/// ```
///
/// This imports:
/// - [`ParticleSystem`], [`ParticleEmitter`] - emitter aggregation
/// - [`EmitterShape`] and every shape parameter struct
/// - [`FloatDistribution`], [`ColorDistribution`] - attribute distributions
/// - [`ParticleSet`], [`EmitterFrameState`] - the spawn destination
/// - [`Random`] - the seedable random source
/// - [`Vec2`], [`Vec3`], [`Mat4`] - glam math types
pub mod prelude {
    pub use crate::color::{unorm_to_u8, Rgba};
    pub use crate::curve::{ColorGradient, CurveKey, FloatCurve, GradientKey};
    pub use crate::distribution::{ColorDistribution, FloatDistribution};
    pub use crate::emitter::{ParticleEmitter, ParticleSystem};
    pub use crate::error::ShapeError;
    pub use crate::mesh::{MeshData, MeshNormals};
    pub use crate::particles::{EmitterFrameState, ParticleSet};
    pub use crate::random::Random;
    pub use crate::shapes::{
        BoxEmitFrom, BoxShape, CircleShape, ConeEmitFrom, ConeShape, EmitterShape,
        HemisphereShape, LineShape, MeshEmitFrom, MeshSampler, MeshShape, RectShape, SphereShape,
    };
    pub use crate::{Mat4, Vec2, Vec3};
}
