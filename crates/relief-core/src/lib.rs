//! Procedural heightmap synthesis.
//!
//! Two families of generators share a small set of numeric primitives:
//!
//! - [`fractal`]: recursive subdivision (diamond-square grids, midpoint-displacement profiles)
//! - [`noise`]: N-dimensional gradient noise with pluggable gradients and weight kernels
//!
//! [`generator`] wires both behind a serde-configurable request type.

pub mod error;
pub mod fractal;
pub mod generator;
pub mod grid;
pub mod interp;
pub mod literal;
pub mod metrics;
pub mod noise;
pub mod profile;
pub mod random;
pub mod range;

pub use error::{Error, Result};
pub use grid::Grid;
pub use profile::Profile;
