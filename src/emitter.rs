//! Emitters and particle systems.
//!
//! A [`ParticleEmitter`] binds one optional [`EmitterShape`] to an emission
//! rate and the distributions that initialize per-particle attributes. A
//! [`ParticleSystem`] owns an ordered set of emitters and drives them every
//! simulation tick.
//!
//! # Example
//!
//! ```ignore
//! let mut system = ParticleSystem::new();
//! let mut emitter = ParticleEmitter::new();
//! emitter.set_shape(Some(SphereShape { radius: 1.0, thickness: 0.0 }.into()));
//! emitter.rate = 200.0;
//! let index = system.add_emitter(emitter);
//!
//! // each simulation tick:
//! system.update(dt, &mut random, &mut particles, &EmitterFrameState::None);
//! ```

use crate::color::Rgba;
use crate::distribution::{ColorDistribution, FloatDistribution};
use crate::particles::{EmitterFrameState, ParticleSet};
use crate::random::Random;
use crate::shapes::EmitterShape;

/// One particle emitter: a shape plus initial-attribute distributions.
///
/// An emitter without a shape emits nothing.
#[derive(Clone, Debug)]
pub struct ParticleEmitter {
    shape: Option<EmitterShape>,
    /// Emission rate in particles per second, used by [`ParticleEmitter::tick`].
    pub rate: f32,
    /// Initial particle color.
    pub initial_color: ColorDistribution,
    /// Initial particle size.
    pub initial_size: FloatDistribution,
    /// Initial particle lifetime in seconds.
    pub initial_lifetime: FloatDistribution,
    /// Fractional particles carried over between ticks.
    accumulator: f32,
}

impl Default for ParticleEmitter {
    fn default() -> Self {
        Self {
            shape: None,
            rate: 50.0,
            initial_color: ColorDistribution::Constant(Rgba::WHITE),
            initial_size: FloatDistribution::Constant(1.0),
            initial_lifetime: FloatDistribution::Constant(5.0),
            accumulator: 0.0,
        }
    }
}

impl ParticleEmitter {
    /// Create an emitter with default attributes and no shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an emitter around a shape.
    pub fn with_shape(shape: EmitterShape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::default()
        }
    }

    /// Replace the emitter's shape, returning the previous one.
    pub fn set_shape(&mut self, shape: Option<EmitterShape>) -> Option<EmitterShape> {
        std::mem::replace(&mut self.shape, shape)
    }

    /// The emitter's current shape.
    pub fn shape(&self) -> Option<&EmitterShape> {
        self.shape.as_ref()
    }

    /// Spawn exactly `count` particles through the shape, then initialize
    /// color, size and lifetime from the emitter's distributions.
    ///
    /// `time` is passed to curve-based distributions; each particle gets an
    /// independent random factor. Without a shape this is a no-op.
    pub fn emit(
        &self,
        random: &mut Random,
        particles: &mut ParticleSet,
        count: u32,
        state: &EmitterFrameState<'_>,
        time: f32,
    ) {
        let Some(shape) = &self.shape else {
            return;
        };

        let start = particles.len();
        shape.spawn(random, particles, count, state);
        for index in start..particles.len() {
            let factor = random.unit_f32();
            particles.colors_mut()[index] = self.initial_color.evaluate(time, factor);
            let factor = random.unit_f32();
            particles.sizes_mut()[index] = self.initial_size.evaluate(time, factor);
            let factor = random.unit_f32();
            particles.lifetimes_mut()[index] = self.initial_lifetime.evaluate(time, factor);
        }
    }

    /// Advance the emitter by `dt` seconds, emitting `rate * dt` particles
    /// with the fractional remainder carried to the next tick.
    ///
    /// Returns the number of particles emitted.
    pub fn tick(
        &mut self,
        dt: f32,
        random: &mut Random,
        particles: &mut ParticleSet,
        state: &EmitterFrameState<'_>,
        time: f32,
    ) -> u32 {
        self.accumulator += self.rate.max(0.0) * dt;
        let count = self.accumulator as u32;
        self.accumulator -= count as f32;
        if count > 0 {
            self.emit(random, particles, count, state, time);
        }
        count
    }

    /// Reset the fractional emission accumulator.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// An ordered collection of emitters driven as one system.
///
/// Emitters keep the index [`ParticleSystem::add_emitter`] returned for as
/// long as the system lives: removal leaves a vacant slot behind instead of
/// shifting later emitters down, and vacated indices are never reused.
#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
    emitters: Vec<Option<ParticleEmitter>>,
    time: f32,
}

impl ParticleSystem {
    /// Create an empty system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an emitter, returning its stable 0-based index.
    ///
    /// Successive calls return strictly increasing indices.
    pub fn add_emitter(&mut self, emitter: ParticleEmitter) -> usize {
        self.emitters.push(Some(emitter));
        self.emitters.len() - 1
    }

    /// Remove the emitter at `index`, returning it.
    ///
    /// The slot stays vacant so every other emitter keeps its index.
    /// Returns `None` for unknown or already-vacated indices.
    pub fn remove_emitter(&mut self, index: usize) -> Option<ParticleEmitter> {
        self.emitters.get_mut(index).and_then(Option::take)
    }

    /// The emitter at `index`, if the slot is occupied.
    pub fn emitter(&self, index: usize) -> Option<&ParticleEmitter> {
        self.emitters.get(index).and_then(Option::as_ref)
    }

    /// Mutable access to the emitter at `index`.
    pub fn emitter_mut(&mut self, index: usize) -> Option<&mut ParticleEmitter> {
        self.emitters.get_mut(index).and_then(Option::as_mut)
    }

    /// Number of live (non-removed) emitters.
    pub fn emitter_count(&self) -> usize {
        self.emitters.iter().flatten().count()
    }

    /// Seconds of simulation time accumulated by [`ParticleSystem::update`].
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance the system by `dt` seconds, ticking every live emitter in
    /// insertion order.
    pub fn update(
        &mut self,
        dt: f32,
        random: &mut Random,
        particles: &mut ParticleSet,
        state: &EmitterFrameState<'_>,
    ) {
        self.time += dt;
        let time = self.time;
        for emitter in self.emitters.iter_mut().flatten() {
            emitter.tick(dt, random, particles, state, time);
        }
    }
}
