//! N-dimensional gradient noise.
//!
//! - [`gradient`]: the engine, generic over gradient sources and weight kernels
//! - [`weight`]: the two supplied corner-weighting policies
//! - [`fbm`]: octave sums of the engine
//! - [`field`]: sampling the engine over a rectangular view into a [`crate::Grid`]

pub mod fbm;
pub mod field;
pub mod gradient;
pub mod weight;

pub use fbm::Fbm;
pub use field::{noise_height_map, sample_noise_map, shape_heights, NoiseMapParams};
pub use gradient::{
    perlin, perlin_with, CoordinateGradients, GradientNoise, GradientSource, MAX_DIMENSIONS,
};
pub use weight::{MaxCoordinate, SumOfSquares, WeightKernel, WeightPolicy};
