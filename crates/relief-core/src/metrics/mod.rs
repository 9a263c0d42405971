//! Summary statistics for generated fields.

pub mod autocorrelation;
pub mod hurst;

pub use autocorrelation::lag_autocorrelation;
pub use hurst::{compute_hurst, HurstResult};
