//! Recursive-subdivision terrain generators.
//!
//! - [`diamond_square`]: square grids of side `2^k + 1` refined from four corners
//! - [`midpoint`]: 1D profiles refined from two endpoints
//! - [`schedule`]: per-iteration mutation rates for profile generation

pub mod diamond_square;
pub mod midpoint;
pub mod schedule;

pub use diamond_square::{
    generate_height_map, increase_definition, DiamondSquare, Refiner, RECOMMENDED_MAX_DEFINITION,
};
pub use midpoint::{generate_profile, midpoint_iteration, Displacement};
pub use schedule::MutationSchedule;

use rand::Rng;

use crate::range::map_to_range;

/// Uniform value within `±randomness` of `center`.
#[inline]
pub(crate) fn perturb<R: Rng + ?Sized>(rng: &mut R, center: f64, randomness: f64) -> f64 {
    map_to_range(rng.gen::<f64>(), 0.0, 1.0, center - randomness, center + randomness)
}
