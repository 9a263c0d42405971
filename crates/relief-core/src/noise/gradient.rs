//! Dimension-generic gradient noise.
//!
//! For a point in `D` dimensions:
//!   1. Floor each coordinate to get the base lattice corner; the `2^D` cell
//!      corners add bit `d` of the corner index to dimension `d`.
//!   2. Ask the gradient source for each corner's gradient.
//!   3. Each corner's planar value is `Σ g[d] · (offset[d] − bit[d])`, the
//!      height at the point of a plane through that corner at height 0.
//!   4. Blend the planar values with the weight kernel applied to the per-axis
//!      distances `|offset[d] − bit[d]|`: `Σ w·v / Σ w`.
//!
//! At an integer point every planar value of the coincident corner is 0 and
//! that corner carries all the weight, so the noise is 0 on the lattice.
use super::weight::{SumOfSquares, WeightKernel};
use crate::error::{Error, Result};
use crate::random::coordinate_random;

/// `2^D` corners are visited per sample; beyond this the cost is unreasonable.
pub const MAX_DIMENSIONS: usize = 16;

/// Supplies the gradient attached to a lattice corner.
///
/// The returned vector must have one component per dimension of `corner`.
pub trait GradientSource {
    fn gradient(&self, corner: &[i64]) -> Vec<f64>;
}

impl<F> GradientSource for F
where
    F: Fn(&[i64]) -> Vec<f64>,
{
    #[inline]
    fn gradient(&self, corner: &[i64]) -> Vec<f64> {
        self(corner)
    }
}

/// Gradients from [`coordinate_random`], one draw per dimension with the
/// dimension index appended to the corner tuple so axes differ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateGradients {
    pub origin: f64,
    pub bound: f64,
}

impl Default for CoordinateGradients {
    fn default() -> Self {
        Self { origin: -1.0, bound: 1.0 }
    }
}

impl GradientSource for CoordinateGradients {
    fn gradient(&self, corner: &[i64]) -> Vec<f64> {
        let mut seed = Vec::with_capacity(corner.len() + 1);
        seed.extend_from_slice(corner);
        seed.push(0);
        (0..corner.len())
            .map(|d| {
                seed[corner.len()] = d as i64;
                coordinate_random(self.origin, self.bound, &seed)
            })
            .collect()
    }
}

/// Gradient noise over any number of dimensions.
#[derive(Debug, Clone, Default)]
pub struct GradientNoise<G = CoordinateGradients, W = SumOfSquares> {
    pub gradients: G,
    pub weights: W,
}

impl<G: GradientSource, W: WeightKernel> GradientNoise<G, W> {
    pub fn new(gradients: G, weights: W) -> Self {
        Self { gradients, weights }
    }

    /// Evaluate the noise at `point`.
    ///
    /// Offsets are `x − floor(x)`, so negative coordinates fall in the cell
    /// below them. Coordinates beyond the `i64` lattice saturate and the far
    /// corner wraps; non-finite coordinates yield NaN. If every corner weight
    /// is zero (possible with round kernels from four dimensions up) the plain
    /// mean of the planar values is used.
    pub fn sample(&self, point: &[f64]) -> Result<f64> {
        let dims = point.len();
        if dims == 0 {
            return Err(Error::EmptyPoint);
        }
        if dims > MAX_DIMENSIONS {
            return Err(Error::TooManyDimensions { dims, max: MAX_DIMENSIONS });
        }

        let base: Vec<i64> = point.iter().map(|p| p.floor() as i64).collect();
        let offset: Vec<f64> = point.iter().map(|p| p - p.floor()).collect();

        let n_corners = 1usize << dims;
        let mut corner = vec![0i64; dims];
        let mut distances = vec![0f64; dims];
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut plain_sum = 0.0;

        for index in 0..n_corners {
            for d in 0..dims {
                corner[d] = base[d].wrapping_add(((index >> d) & 1) as i64);
            }
            let gradient = self.gradients.gradient(&corner);
            if gradient.len() != dims {
                return Err(Error::DimensionMismatch { expected: dims, actual: gradient.len() });
            }

            let mut planar = 0.0;
            for d in 0..dims {
                let delta = offset[d] - ((index >> d) & 1) as f64;
                planar += gradient[d] * delta;
                distances[d] = delta.abs();
            }

            let w = self.weights.weight(&distances);
            weighted_sum += w * planar;
            weight_total += w;
            plain_sum += planar;
        }

        if weight_total > 0.0 {
            Ok(weighted_sum / weight_total)
        } else {
            Ok(plain_sum / n_corners as f64)
        }
    }
}

/// Gradient noise at `point` with coordinate-random gradients in `[-1, 1)`
/// and the sum-of-squares kernel.
pub fn perlin(point: &[f64]) -> Result<f64> {
    GradientNoise::<CoordinateGradients, SumOfSquares>::default().sample(point)
}

/// Gradient noise at `point` with caller-supplied gradients and weights.
pub fn perlin_with<G, W>(point: &[f64], gradients: G, weights: W) -> Result<f64>
where
    G: GradientSource,
    W: WeightKernel,
{
    GradientNoise::new(gradients, weights).sample(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::weight::MaxCoordinate;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_on_every_lattice_corner() {
        for x in -3..4 {
            assert_eq!(perlin(&[x as f64]).unwrap(), 0.0);
            for y in -3..4 {
                assert_eq!(perlin(&[x as f64, y as f64]).unwrap(), 0.0);
                assert_eq!(perlin(&[x as f64, y as f64, (x * y) as f64]).unwrap(), 0.0);
                let max = perlin_with(&[x as f64, y as f64], CoordinateGradients::default(), MaxCoordinate);
                assert_eq!(max.unwrap(), 0.0);
            }
        }
    }

    #[test]
    fn deterministic_and_non_trivial() {
        let a = perlin(&[1.25, -3.6]).unwrap();
        let b = perlin(&[1.25, -3.6]).unwrap();
        assert_eq!(a, b);

        let values: Vec<f64> = (0..50).map(|i| perlin(&[i as f64 * 0.37, 0.5]).unwrap()).collect();
        let spread = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
            - values.iter().cloned().fold(f64::INFINITY, f64::min);
        assert!(spread > 0.05, "noise looks constant: spread {spread}");
    }

    #[test]
    fn bounded_by_dimension() {
        for i in 0..200 {
            let p = [i as f64 * 0.173, i as f64 * -0.291];
            let v = perlin(&p).unwrap();
            assert!(v.abs() <= 2.0, "value {v} at {p:?} exceeds planar bound");
        }
    }

    #[test]
    fn continuous_across_cell_faces() {
        let eps = 1e-9;
        for kernel in [crate::noise::WeightPolicy::SumOfSquares, crate::noise::WeightPolicy::MaxCoordinate] {
            let noise = GradientNoise::new(CoordinateGradients::default(), kernel);
            for y in [0.1, 0.45, 0.8] {
                let left = noise.sample(&[2.0 - eps, y]).unwrap();
                let right = noise.sample(&[2.0 + eps, y]).unwrap();
                assert!((left - right).abs() < 1e-6, "jump at x=2, y={y}: {left} vs {right}");
            }
        }
    }

    #[test]
    fn gradients_decorrelated_per_axis() {
        let g = CoordinateGradients::default().gradient(&[4, 4]);
        assert_eq!(g.len(), 2);
        assert_ne!(g[0], g[1]);
    }

    #[test]
    fn zero_gradients_give_zero_field() {
        let zero = |c: &[i64]| vec![0.0; c.len()];
        for p in [[0.3, 0.7], [-1.2, 5.5]] {
            assert_eq!(perlin_with(&p, zero, SumOfSquares).unwrap(), 0.0);
        }
    }

    #[test]
    fn uniform_weights_average_planar_values() {
        let constant = |_: &[i64]| vec![1.0, 0.0];
        let uniform = |_: &[f64]| 1.0;
        let v = perlin_with(&[0.3, 0.6], constant, uniform).unwrap();
        assert_abs_diff_eq!(v, 0.3 - 0.5, epsilon = 1e-12);
    }

    #[test]
    fn zero_total_weight_falls_back_to_mean() {
        let ones = |c: &[i64]| vec![1.0; c.len()];
        let v = perlin_with(&[0.5, 0.5, 0.5, 0.5], ones, SumOfSquares).unwrap();
        assert!(v.is_finite());
        assert_abs_diff_eq!(v, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn one_dimension_uses_two_corners() {
        use std::cell::Cell;
        let calls = Cell::new(0);
        let counting = |c: &[i64]| {
            calls.set(calls.get() + 1);
            vec![c[0] as f64]
        };
        perlin_with(&[0.4], counting, SumOfSquares).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn invalid_points_are_rejected() {
        assert!(matches!(perlin(&[]), Err(Error::EmptyPoint)));
        assert!(matches!(
            perlin(&[0.5; MAX_DIMENSIONS + 1]),
            Err(Error::TooManyDimensions { .. })
        ));
        let short = |_: &[i64]| vec![1.0];
        assert!(matches!(
            perlin_with(&[0.5, 0.5], short, SumOfSquares),
            Err(Error::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn extreme_coordinates_stay_defined() {
        let far = perlin(&[1e19, 0.5]).unwrap();
        assert!(far.is_finite());
        let near_min = perlin(&[-1e19, 0.25, 3.5]).unwrap();
        assert!(near_min.is_finite());
        assert!(perlin(&[f64::INFINITY]).unwrap().is_nan());
        assert!(perlin(&[0.5, f64::NEG_INFINITY]).unwrap().is_nan());
    }
}
