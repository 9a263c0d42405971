//! Deterministic pseudo-random values derived from integer coordinates.
//!
//! A plain `StdRng::seed_from_u64(x)` is reproducible but forces callers to keep a
//! generator around, and seeding with a sum of coordinates produces visible
//! diagonal patterns. Instead each coordinate is folded into a running seed
//! through repeated reseeding, so neighbouring tuples land far apart.
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// One reseed round: seed a fresh generator and take its first output.
#[inline]
fn reseed(seed: u64) -> u64 {
    StdRng::seed_from_u64(seed).next_u64()
}

/// Fold a coordinate tuple into a single seed.
///
/// Each coordinate is added to the value derived so far and the sum is
/// reseeded twice. An empty tuple folds to `0`.
pub fn fold_coordinates(coords: &[i64]) -> u64 {
    coords
        .iter()
        .fold(0u64, |tracked, &c| reseed(reseed(tracked.wrapping_add(c as u64))))
}

/// Reproducible value in `[origin, bound)` for a single seed.
///
/// The seed passes through two reseed rounds before the final draw.
pub fn seed_random(seed: u64, origin: f64, bound: f64) -> f64 {
    let mut rng = StdRng::seed_from_u64(reseed(reseed(seed)));
    let unit: f64 = rng.gen();
    origin + unit * (bound - origin)
}

/// Reproducible value in `[origin, bound)` for a coordinate tuple.
///
/// Same tuple, same range, same result. When `bound < origin` the value lies in
/// `(bound, origin]`; when they are equal it is `origin`.
pub fn coordinate_random(origin: f64, bound: f64, coords: &[i64]) -> f64 {
    seed_random(fold_coordinates(coords), origin, bound)
}
