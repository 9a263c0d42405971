//! Corner weighting kernels.
//!
//! A kernel maps the per-axis distances from the sample to one cell corner
//! (each in `[0, 1]`) to a weight. Every kernel here is 1 at zero distance
//! and reaches 0, with zero slope, once a corner is a full cell away.
use serde::{Deserialize, Serialize};

use crate::range::clamp01;

pub trait WeightKernel {
    fn weight(&self, offsets: &[f64]) -> f64;
}

impl<F> WeightKernel for F
where
    F: Fn(&[f64]) -> f64,
{
    #[inline]
    fn weight(&self, offsets: &[f64]) -> f64 {
        self(offsets)
    }
}

/// `(clamp01(Σ o²) − 1)²`: round falloff, flat at both extremes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumOfSquares;

impl WeightKernel for SumOfSquares {
    #[inline]
    fn weight(&self, offsets: &[f64]) -> f64 {
        let d2 = clamp01(offsets.iter().map(|o| o * o).sum());
        (d2 - 1.0) * (d2 - 1.0)
    }
}

/// `clamp01((max o − 1)²)`: square, axis-aligned falloff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxCoordinate;

impl WeightKernel for MaxCoordinate {
    #[inline]
    fn weight(&self, offsets: &[f64]) -> f64 {
        parabolic(offsets.iter().cloned().fold(0.0, f64::max))
    }
}

#[inline]
fn parabolic(o: f64) -> f64 {
    clamp01((o - 1.0) * (o - 1.0))
}

/// Serializable choice between the supplied kernels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPolicy {
    #[default]
    SumOfSquares,
    MaxCoordinate,
}

impl WeightKernel for WeightPolicy {
    #[inline]
    fn weight(&self, offsets: &[f64]) -> f64 {
        match self {
            WeightPolicy::SumOfSquares => SumOfSquares.weight(offsets),
            WeightPolicy::MaxCoordinate => MaxCoordinate.weight(offsets),
        }
    }
}
