//! Deterministic random source for spawn sampling.
//!
//! Every emitter shape draws its randomness from a [`Random`] instance the
//! caller supplies. Seeding one per emitter (or per system) keeps spawn
//! sequences reproducible and keeps concurrently-updating systems from
//! sharing mutable generator state.
//!
//! # Example
//!
//! ```ignore
//! let mut random = Random::new(42);
//! let r = random.unit_f32();          // [0, 1)
//! let dir = random.unit_vector();     // uniform on the unit sphere
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Seedable pseudo-random generator used by emitter shapes.
///
/// The same seed always produces the same sample sequence.
#[derive(Debug, Clone)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    /// Create a generator from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn unit_f32(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. `min == max` returns `min`.
    #[inline]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.rng.gen::<f32>()
    }

    /// Random f32 in `[-1, 1)`.
    #[inline]
    pub fn signed_f32(&mut self) -> f32 {
        self.rng.gen::<f32>() * 2.0 - 1.0
    }

    /// Random u32 in `[min, max)`. `max` must be greater than `min`.
    #[inline]
    pub fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..max)
    }

    /// Random unit vector, uniformly distributed on the unit sphere.
    ///
    /// Built from a uniform z and a uniform azimuth, which avoids the
    /// polar clustering a naive latitude/longitude sample produces.
    pub fn unit_vector(&mut self) -> Vec3 {
        let z = self.signed_f32();
        let theta = self.unit_f32() * TAU;
        let planar = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(planar * theta.cos(), planar * theta.sin(), z)
    }
}
