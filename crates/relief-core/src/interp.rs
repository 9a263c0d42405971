//! 1D blends between a slope at `x = 0` and a slope at `x = 1`.
//!
//! Two interchangeable families:
//! - [`Cubic`]: the Hermite cubic matching both values and both slopes
//! - [`fade_blend`]: two tangent lines mixed by a [`Fade`] curve
//!
//! [`slope_noise_1d`] strings either one along the integer lattice using a
//! per-integer slope source.
use serde::{Deserialize, Serialize};

use crate::random::coordinate_random;

/// `p(x) = a·x³ + b·x² + c·x + d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Cubic {
    /// The cubic with `p(0) = value0`, `p(1) = value1`, `p'(0) = slope0`, `p'(1) = slope1`.
    ///
    /// From `d = value0`, `c = slope0` and the two conditions at `x = 1`:
    /// `a + b = value1 − slope0 − value0` and `3a + 2b = slope1 − slope0`.
    pub fn hermite(value0: f64, value1: f64, slope0: f64, slope1: f64) -> Self {
        Self {
            a: slope0 + slope1 + 2.0 * value0 - 2.0 * value1,
            b: 3.0 * value1 - 2.0 * slope0 - 3.0 * value0 - slope1,
            c: slope0,
            d: value0,
        }
    }

    /// Hermite cubic with both boundary values at zero.
    pub fn from_slopes(slope0: f64, slope1: f64) -> Self {
        Self { a: slope0 + slope1, b: -2.0 * slope0 - slope1, c: slope0, d: 0.0 }
    }

    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        ((self.a * x + self.b) * x + self.c) * x + self.d
    }

    #[inline]
    pub fn derivative(&self, x: f64) -> f64 {
        (3.0 * self.a * x + 2.0 * self.b) * x + self.c
    }
}

/// Monotonic smoothing curves over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fade {
    /// `x`
    Linear,
    /// `3x² − 2x³`
    Smoothstep,
    /// `6x⁵ − 15x⁴ + 10x³`
    #[default]
    Smootherstep,
}

impl Fade {
    #[inline]
    pub fn weight(self, x: f64) -> f64 {
        match self {
            Fade::Linear => x,
            Fade::Smoothstep => x * x * (3.0 - 2.0 * x),
            Fade::Smootherstep => x * x * x * (x * (6.0 * x - 15.0) + 10.0),
        }
    }
}

/// Blend the tangent lines `slope0·x` and `slope1·(x − 1)` with `fade`.
#[inline]
pub fn fade_blend(x: f64, slope0: f64, slope1: f64, fade: Fade) -> f64 {
    let w = fade.weight(x);
    let line0 = slope0 * x;
    let line1 = slope1 * (x - 1.0);
    w * line1 + (1.0 - w) * line0
}

/// Which blend [`slope_noise_1d`] uses between lattice points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "fade", rename_all = "snake_case")]
pub enum Interpolator {
    #[default]
    Cubic,
    Fade(Fade),
}

impl Interpolator {
    /// Value at `x ∈ [0, 1]` of a curve that is 0 at both ends with the given end slopes.
    #[inline]
    pub fn interpolate(self, x: f64, slope0: f64, slope1: f64) -> f64 {
        match self {
            Interpolator::Cubic => Cubic::from_slopes(slope0, slope1).eval(x),
            Interpolator::Fade(fade) => fade_blend(x, slope0, slope1, fade),
        }
    }
}

/// Deterministic per-integer slopes in `[origin, bound)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSlopes {
    pub origin: f64,
    pub bound: f64,
}

impl Default for CoordinateSlopes {
    fn default() -> Self {
        Self { origin: -2.0, bound: 2.0 }
    }
}

impl CoordinateSlopes {
    pub fn slope(&self, lattice: i64) -> f64 {
        coordinate_random(self.origin, self.bound, &[lattice])
    }
}

/// 1D gradient noise: slopes at `floor(x)` and `floor(x) + 1`, blended over
/// the fractional part. Zero at every integer.
pub fn slope_noise_1d<F>(x: f64, slopes: F, interpolator: Interpolator) -> f64
where
    F: Fn(i64) -> f64,
{
    let base = x.floor();
    let lattice = base as i64;
    interpolator.interpolate(x - base, slopes(lattice), slopes(lattice.wrapping_add(1)))
}
