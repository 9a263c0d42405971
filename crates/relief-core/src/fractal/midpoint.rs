//! Midpoint displacement for 1D profiles.
//!
//! One iteration turns `n` samples into `2n − 1`: originals stay on even
//! indices, each odd index is drawn around the pair it sits between.
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::perturb;
use crate::error::{Error, Result};
use crate::profile::Profile;
use crate::range::map_to_range;

/// How the mutation rate displaces a new midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Displacement {
    /// Uniform in `[mid − rate, mid + rate]`.
    #[default]
    Additive,
    /// `(2u − 1) · rate` in `[-1, 1]`, mapped onto the span between the two
    /// neighbours. A rate of 1 covers the whole span; smaller rates pull the
    /// midpoint toward the centre of the span.
    Multiplicative,
}

/// Run one midpoint-displacement iteration over `profile`.
pub fn midpoint_iteration<R: Rng + ?Sized>(
    profile: &[f64],
    mutation_rate: f64,
    displacement: Displacement,
    rng: &mut R,
) -> Result<Profile> {
    let (&last, _) = profile.split_last().ok_or(Error::EmptyProfile)?;

    let mut next = Vec::with_capacity(2 * profile.len() - 1);
    for pair in profile.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        next.push(left);
        let mid = match displacement {
            Displacement::Additive => perturb(rng, (left + right) / 2.0, mutation_rate),
            Displacement::Multiplicative => {
                let t = (2.0 * rng.gen::<f64>() - 1.0) * mutation_rate;
                map_to_range(t, -1.0, 1.0, left, right)
            }
        };
        next.push(mid);
    }
    next.push(last);

    Ok(Profile::new(next))
}

/// Build a profile of `2^iterations + 1` samples from two uniform `[0, 1)` endpoints.
///
/// `mutation_rate_at(i)` supplies the rate for iteration `i`; any decay policy
/// lives with the caller (see [`super::MutationSchedule`]).
pub fn generate_profile<R, F>(
    iterations: usize,
    mutation_rate_at: F,
    displacement: Displacement,
    rng: &mut R,
) -> Result<Profile>
where
    R: Rng + ?Sized,
    F: Fn(usize) -> f64,
{
    let mut profile = Profile::new(vec![rng.gen::<f64>(), rng.gen::<f64>()]);
    for i in 0..iterations {
        let rate = mutation_rate_at(i);
        tracing::debug!(iteration = i, rate, len = profile.len(), "midpoint iteration");
        profile = midpoint_iteration(profile.as_slice(), rate, displacement, rng)?;
    }
    Ok(profile)
}
