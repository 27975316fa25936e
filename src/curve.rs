//! Keyframed curves and gradients for time-varying particle properties.
//!
//! [`FloatCurve`] and [`ColorGradient`] are piecewise-linear keyframe
//! evaluators. Evaluation outside the keyed time range clamps to the first
//! or last key, so distributions never have to range-check the time they
//! pass in.

use crate::color::{unorm_to_u8, Rgba};

/// A single keyframe on a [`FloatCurve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveKey {
    /// Time of the keyframe.
    pub time: f32,
    /// Value at that time.
    pub value: f32,
}

/// Piecewise-linear scalar curve.
///
/// Keys are sorted by time at construction. An empty curve evaluates to
/// `0.0`; a single-key curve is constant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FloatCurve {
    keys: Vec<CurveKey>,
}

impl FloatCurve {
    /// Build a curve from keyframes, sorting them by time.
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// A curve that evaluates to the same value everywhere.
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![CurveKey { time: 0.0, value }],
        }
    }

    /// The curve's keyframes, sorted by time.
    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Evaluate the curve at time `t`, clamping outside the keyed range.
    pub fn evaluate(&self, t: f32) -> f32 {
        match self.keys.len() {
            0 => return 0.0,
            1 => return self.keys[0].value,
            _ => {}
        }

        let last = self.keys[self.keys.len() - 1];
        if t <= self.keys[0].time {
            return self.keys[0].value;
        }
        if t >= last.time {
            return last.value;
        }

        let upper = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return a.value;
        }
        let local = (t - a.time) / span;
        (1.0 - local) * a.value + local * b.value
    }
}

/// A single keyframe on a [`ColorGradient`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientKey {
    /// Time of the keyframe.
    pub time: f32,
    /// Color at that time.
    pub color: Rgba,
}

/// Piecewise color gradient over packed RGBA keys.
///
/// Between keys the channels blend through the fixed-point [`Rgba::lerp`]
/// path, so a gradient lookup is bit-identical to blending its neighboring
/// keys with the quantized local factor. An empty gradient evaluates to
/// white.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorGradient {
    keys: Vec<GradientKey>,
}

impl ColorGradient {
    /// Build a gradient from keyframes, sorting them by time.
    pub fn new(mut keys: Vec<GradientKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// A gradient that evaluates to the same color everywhere.
    pub fn constant(color: Rgba) -> Self {
        Self {
            keys: vec![GradientKey { time: 0.0, color }],
        }
    }

    /// The gradient's keyframes, sorted by time.
    pub fn keys(&self) -> &[GradientKey] {
        &self.keys
    }

    /// Evaluate the gradient at time `t`, clamping outside the keyed range.
    pub fn evaluate(&self, t: f32) -> Rgba {
        match self.keys.len() {
            0 => return Rgba::WHITE,
            1 => return self.keys[0].color,
            _ => {}
        }

        let last = self.keys[self.keys.len() - 1];
        if t <= self.keys[0].time {
            return self.keys[0].color;
        }
        if t >= last.time {
            return last.color;
        }

        let upper = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return a.color;
        }
        let local = (t - a.time) / span;
        Rgba::lerp(unorm_to_u8(local), a.color, b.color)
    }
}
