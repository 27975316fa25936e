//! Value distributions for particle properties.
//!
//! A distribution turns `(time, factor)` into a concrete value. The same
//! four forms cover scalars and colors:
//!
//! | Form | Result |
//! |------|--------|
//! | `Constant` | The stored value; time and factor are ignored |
//! | `RandomRange` | Blend of min/max by `factor` |
//! | `Curve` | Curve evaluated at `time`; factor is ignored |
//! | `RandomCurveRange` | Both curves evaluated at `time`, then blended by `factor` |
//!
//! The caller supplies `factor` (typically one fresh random unit float per
//! particle), so evaluation itself is pure: a distribution never mutates
//! and never draws randomness on its own.
//!
//! # Example
//!
//! ```ignore
//! let size = FloatDistribution::RandomRange { min: 0.5, max: 2.0 };
//! let value = size.evaluate(time, random.unit_f32());
//! ```

use crate::color::{unorm_to_u8, Rgba};
use crate::curve::{ColorGradient, FloatCurve};

/// Scalar particle property distribution.
#[derive(Clone, Debug, PartialEq)]
pub enum FloatDistribution {
    /// Always returns the stored value.
    Constant(f32),
    /// Random value in a constant range.
    RandomRange {
        /// Value returned for factor 0.
        min: f32,
        /// Value returned for factor 1.
        max: f32,
    },
    /// Time-varying value.
    Curve(FloatCurve),
    /// Random value in a time-varying range.
    RandomCurveRange {
        /// Curve returned for factor 0.
        min: FloatCurve,
        /// Curve returned for factor 1.
        max: FloatCurve,
    },
}

impl FloatDistribution {
    /// Evaluate the distribution.
    ///
    /// `t` only matters for curve forms; `factor` in `[0, 1]` only matters
    /// for range forms, where 0 returns the minimum and 1 the maximum
    /// exactly.
    pub fn evaluate(&self, t: f32, factor: f32) -> f32 {
        match self {
            FloatDistribution::Constant(value) => *value,
            FloatDistribution::RandomRange { min, max } => lerp(*min, *max, factor),
            FloatDistribution::Curve(curve) => curve.evaluate(t),
            FloatDistribution::RandomCurveRange { min, max } => {
                lerp(min.evaluate(t), max.evaluate(t), factor)
            }
        }
    }
}

/// Color particle property distribution.
///
/// Range forms blend through the fixed-point [`Rgba::lerp`] path with the
/// factor quantized to 256 steps, matching how gradients themselves blend.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorDistribution {
    /// Always returns the stored color.
    Constant(Rgba),
    /// Random color in a constant range.
    RandomRange {
        /// Color returned for factor 0.
        min: Rgba,
        /// Color returned for factor 1.
        max: Rgba,
    },
    /// Time-varying color.
    Curve(ColorGradient),
    /// Random color in a time-varying range.
    RandomCurveRange {
        /// Gradient returned for factor 0.
        min: ColorGradient,
        /// Gradient returned for factor 1.
        max: ColorGradient,
    },
}

impl ColorDistribution {
    /// Evaluate the distribution. See [`FloatDistribution::evaluate`].
    pub fn evaluate(&self, t: f32, factor: f32) -> Rgba {
        let byte_factor = unorm_to_u8(factor);
        match self {
            ColorDistribution::Constant(color) => *color,
            ColorDistribution::RandomRange { min, max } => Rgba::lerp(byte_factor, *min, *max),
            ColorDistribution::Curve(gradient) => gradient.evaluate(t),
            ColorDistribution::RandomCurveRange { min, max } => {
                Rgba::lerp(byte_factor, min.evaluate(t), max.evaluate(t))
            }
        }
    }
}

/// Endpoint-exact blend: factor 0 returns `min`, factor 1 returns `max`.
#[inline]
fn lerp(min: f32, max: f32, factor: f32) -> f32 {
    (1.0 - factor) * min + factor * max
}
