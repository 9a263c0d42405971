//! Diamond-square heightmap generation.
//!
//! A square grid of side `2^k + 1` is seeded at its four corners, then refined
//! level by level. Each level runs a square phase (block centres from their four
//! diagonal corners) and a diamond phase (edge midpoints from their 2–4
//! orthogonal neighbours), halves the step, and scales the randomness by the
//! roughness factor. The loop ends once the step reaches 1.
use rand::Rng;

use super::perturb;
use crate::error::{Error, Result};
use crate::grid::Grid;

/// Largest side the interactive refinement workflow should reach without asking.
pub const RECOMMENDED_MAX_DEFINITION: usize = 1024;

/// Diamond-square options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondSquare {
    /// Perturbation amplitude at the coarsest level.
    pub initial_randomness: f64,
    /// Multiplier applied to the amplitude each time the step halves.
    pub roughness_factor: f64,
    /// Perturb square-phase centres as well as diamond-phase cells. Off by
    /// default: square-phase centres are stored as the plain corner mean.
    pub square_perturbation: bool,
}

impl Default for DiamondSquare {
    fn default() -> Self {
        Self { initial_randomness: 1.0, roughness_factor: 0.5, square_perturbation: false }
    }
}

impl DiamondSquare {
    pub fn new(initial_randomness: f64, roughness_factor: f64) -> Self {
        Self { initial_randomness, roughness_factor, ..Self::default() }
    }

    pub fn with_square_perturbation(mut self, enabled: bool) -> Self {
        self.square_perturbation = enabled;
        self
    }

    /// Generate a grid of side `2^size_factor + 1`.
    pub fn generate<R: Rng + ?Sized>(&self, size_factor: u32, rng: &mut R) -> Result<Grid> {
        let side = fractal_side(size_factor)?;
        if side > RECOMMENDED_MAX_DEFINITION + 1 {
            tracing::warn!(side, max = RECOMMENDED_MAX_DEFINITION, "height map exceeds recommended definition");
        }

        let mut grid = Grid::square(side);
        let last = side - 1;
        for (r, c) in [(0, 0), (0, last), (last, 0), (last, last)] {
            grid.set(r, c, rng.gen::<f64>());
        }

        let mut step = last;
        let mut randomness = self.initial_randomness;
        while step > 1 {
            tracing::debug!(step, randomness, "diamond-square level");
            square_phase(&mut grid, step, randomness, self.square_perturbation, rng);
            diamond_phase(&mut grid, step, randomness, rng);
            step /= 2;
            randomness *= self.roughness_factor;
        }
        Ok(grid)
    }

    /// [`increase_definition`] honouring this configuration's square-phase policy.
    /// Only `square_perturbation` is read; `randomness` is a fresh amplitude.
    pub fn increase_definition<R: Rng + ?Sized>(&self, grid: &Grid, randomness: f64, rng: &mut R) -> Result<Grid> {
        if grid.data.is_empty() {
            return Err(Error::EmptyGrid);
        }
        let mut refined = Grid::new(2 * grid.rows - 1, 2 * grid.cols - 1, 0.0);
        for r in 0..grid.rows {
            for c in 0..grid.cols {
                refined.set(2 * r, 2 * c, grid.get(r, c));
            }
        }
        tracing::debug!(rows = refined.rows, cols = refined.cols, randomness, "increase definition");

        square_phase(&mut refined, 2, randomness, self.square_perturbation, rng);
        diamond_phase(&mut refined, 2, randomness, rng);
        Ok(refined)
    }
}

/// Generate a diamond-square grid of side `2^size_factor + 1`.
///
/// Corners are uniform in `[0, 1)`; square-phase centres are left unperturbed
/// (see [`DiamondSquare::square_perturbation`]).
pub fn generate_height_map<R: Rng + ?Sized>(
    size_factor: u32,
    initial_randomness: f64,
    roughness_factor: f64,
    rng: &mut R,
) -> Result<Grid> {
    DiamondSquare::new(initial_randomness, roughness_factor).generate(size_factor, rng)
}

/// Double the definition of `grid`: a `r × c` grid becomes `2r−1 × 2c−1`.
///
/// Existing samples land on even-even positions unchanged; the new positions
/// are filled by one square and one diamond phase at step 2 using `randomness`
/// as the perturbation amplitude.
pub fn increase_definition<R: Rng + ?Sized>(grid: &Grid, randomness: f64, rng: &mut R) -> Result<Grid> {
    DiamondSquare::default().increase_definition(grid, randomness, rng)
}

/// Side length `2^size_factor + 1`, rejecting sizes whose cell count overflows.
fn fractal_side(size_factor: u32) -> Result<usize> {
    2usize
        .checked_pow(size_factor)
        .and_then(|s| s.checked_add(1))
        .filter(|s| s.checked_mul(*s).is_some())
        .ok_or(Error::SizeFactorTooLarge { size_factor })
}

/// Fill every `step × step` block centre with the mean of its four corners.
fn square_phase<R: Rng + ?Sized>(grid: &mut Grid, step: usize, randomness: f64, perturbed: bool, rng: &mut R) {
    let half = step / 2;
    for row in (half..grid.rows.saturating_sub(half)).step_by(step) {
        for col in (half..grid.cols.saturating_sub(half)).step_by(step) {
            let mean = (grid.get(row - half, col - half)
                + grid.get(row - half, col + half)
                + grid.get(row + half, col - half)
                + grid.get(row + half, col + half))
                / 4.0;
            let value = if perturbed { perturb(rng, mean, randomness) } else { mean };
            grid.set(row, col, value);
        }
    }
}

/// Fill every edge midpoint of the `step` lattice from its orthogonal
/// neighbours. Cells on the grid border have fewer neighbours; the mean
/// divides by however many exist.
fn diamond_phase<R: Rng + ?Sized>(grid: &mut Grid, step: usize, randomness: f64, rng: &mut R) {
    let half = step / 2;

    // Vertical midpoints: rows between two lattice rows, lattice columns.
    for row in (half..grid.rows.saturating_sub(half)).step_by(step) {
        for col in (0..grid.cols).step_by(step) {
            let mut sum = grid.get(row - half, col) + grid.get(row + half, col);
            let mut count = 2.0;
            if col >= half {
                sum += grid.get(row, col - half);
                count += 1.0;
            }
            if col + half < grid.cols {
                sum += grid.get(row, col + half);
                count += 1.0;
            }
            let value = perturb(rng, sum / count, randomness);
            grid.set(row, col, value);
        }
    }

    // Horizontal midpoints: lattice rows, columns between two lattice columns.
    for row in (0..grid.rows).step_by(step) {
        for col in (half..grid.cols.saturating_sub(half)).step_by(step) {
            let mut sum = grid.get(row, col - half) + grid.get(row, col + half);
            let mut count = 2.0;
            if row >= half {
                sum += grid.get(row - half, col);
                count += 1.0;
            }
            if row + half < grid.rows {
                sum += grid.get(row + half, col);
                count += 1.0;
            }
            let value = perturb(rng, sum / count, randomness);
            grid.set(row, col, value);
        }
    }
}

/// Interactive "one more level of detail" session.
///
/// Each [`Refiner::refine`] doubles the definition with the current randomness,
/// then scales the randomness by `auto_roughness` for the next call.
#[derive(Debug, Clone)]
pub struct Refiner {
    grid: Grid,
    randomness: f64,
    auto_roughness: f64,
}

impl Refiner {
    pub fn new(grid: Grid, randomness: f64, auto_roughness: f64) -> Self {
        Self { grid, randomness, auto_roughness }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Randomness the next refinement will use.
    pub fn randomness(&self) -> f64 {
        self.randomness
    }

    /// True if the next refinement would exceed [`RECOMMENDED_MAX_DEFINITION`].
    pub fn would_exceed_recommended(&self) -> bool {
        (2 * self.grid.rows).saturating_sub(1) > RECOMMENDED_MAX_DEFINITION
            || (2 * self.grid.cols).saturating_sub(1) > RECOMMENDED_MAX_DEFINITION
    }

    pub fn refine<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Grid> {
        if self.would_exceed_recommended() {
            tracing::warn!(
                current = self.grid.rows.max(self.grid.cols),
                max = RECOMMENDED_MAX_DEFINITION,
                "refinement exceeds recommended definition"
            );
        }
        self.grid = increase_definition(&self.grid, self.randomness, rng)?;
        self.randomness *= self.auto_roughness;
        Ok(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_hurst;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn side_is_power_of_two_plus_one() {
        let mut rng = StdRng::seed_from_u64(1);
        for k in 0..8 {
            let g = generate_height_map(k, 1.0, 0.5, &mut rng).unwrap();
            assert_eq!(g.rows, (1 << k) + 1);
            assert_eq!(g.cols, (1 << k) + 1);
            assert!(g.is_fractal_side());
        }
    }

    #[test]
    fn corners_are_unit_uniform() {
        let mut rng = StdRng::seed_from_u64(7);
        for k in 0..6 {
            let g = generate_height_map(k, 3.0, 0.9, &mut rng).unwrap();
            let last = g.rows - 1;
            for (r, c) in [(0, 0), (0, last), (last, 0), (last, last)] {
                let v = g.get(r, c);
                assert!((0.0..1.0).contains(&v), "corner ({r},{c}) = {v}");
            }
        }
    }

    #[test]
    fn zero_randomness_square_phase_is_corner_mean() {
        let mut rng = StdRng::seed_from_u64(3);
        let g = generate_height_map(1, 0.0, 0.5, &mut rng).unwrap();
        let mean = (g.get(0, 0) + g.get(0, 2) + g.get(2, 0) + g.get(2, 2)) / 4.0;
        assert_eq!(g.get(1, 1), mean);
        // Edge midpoint (0,1): neighbours (0,0), (0,2), (1,1).
        let edge = (g.get(0, 0) + g.get(0, 2) + g.get(1, 1)) / 3.0;
        assert!((g.get(0, 1) - edge).abs() < 1e-12);
    }

    #[test]
    fn diamond_cells_stay_within_randomness() {
        let mut rng = StdRng::seed_from_u64(11);
        let g = generate_height_map(1, 0.25, 0.5, &mut rng).unwrap();
        let lo = g.min_height();
        let hi = g.max_height();
        assert!(lo >= -0.25 && hi < 1.25, "range [{lo}, {hi}] exceeds corner range ± randomness");
    }

    #[test]
    fn same_seed_same_grid() {
        let a = generate_height_map(5, 1.0, 0.5, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = generate_height_map(5, 1.0, 0.5, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn square_perturbation_changes_centres() {
        let plain = DiamondSquare::new(1.0, 0.5);
        let perturbed = plain.with_square_perturbation(true);
        let a = plain.generate(1, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = perturbed.generate(1, &mut StdRng::seed_from_u64(5)).unwrap();
        let mean = (b.get(0, 0) + b.get(0, 2) + b.get(2, 0) + b.get(2, 2)) / 4.0;
        assert_eq!(a.get(1, 1), mean);
        assert_ne!(b.get(1, 1), mean);
    }

    #[test]
    fn oversized_factor_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate_height_map(64, 1.0, 0.5, &mut rng),
            Err(Error::SizeFactorTooLarge { size_factor: 64 })
        ));
    }

    #[test]
    fn lower_roughness_gives_smoother_grid() {
        let smooth = generate_height_map(7, 1.0, 0.4, &mut StdRng::seed_from_u64(21)).unwrap();
        let rough = generate_height_map(7, 1.0, 0.85, &mut StdRng::seed_from_u64(21)).unwrap();
        let h_smooth = compute_hurst(&smooth).h;
        let h_rough = compute_hurst(&rough).h;
        assert!(h_smooth > h_rough, "H_smooth={h_smooth:.3} should exceed H_rough={h_rough:.3}");
    }

    #[test]
    fn increase_definition_preserves_even_samples() {
        let mut rng = StdRng::seed_from_u64(13);
        let base = generate_height_map(3, 1.0, 0.5, &mut rng).unwrap();
        let refined = increase_definition(&base, 0.3, &mut rng).unwrap();
        assert_eq!(refined.rows, 2 * base.rows - 1);
        assert_eq!(refined.cols, 2 * base.cols - 1);
        assert_eq!(refined.even_subgrid(), base);
    }

    #[test]
    fn increase_definition_handles_rectangles() {
        let base = Grid::from_rows(vec![vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]]).unwrap();
        let refined = increase_definition(&base, 0.0, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!((refined.rows, refined.cols), (3, 5));
        assert_eq!(refined.even_subgrid(), base);
        // Zero randomness on a linear ramp reproduces the ramp at square centres.
        assert!((refined.get(1, 1) - 1.0).abs() < 1e-12);
        // Bottom-right horizontal midpoint has three neighbours: left, right, up.
        let expected = (refined.get(2, 2) + refined.get(2, 4) + refined.get(1, 3)) / 3.0;
        assert!((refined.get(2, 3) - expected).abs() < 1e-12);
    }

    #[test]
    fn increase_definition_of_single_cell() {
        let base = Grid::new(1, 1, 0.4);
        let refined = increase_definition(&base, 1.0, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(refined, base);
    }

    #[test]
    fn refiner_decays_randomness() {
        let seed = Grid::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let mut refiner = Refiner::new(seed, 0.5, 0.5);
        let mut rng = StdRng::seed_from_u64(8);
        refiner.refine(&mut rng).unwrap();
        refiner.refine(&mut rng).unwrap();
        assert_eq!(refiner.grid().rows, 5);
        assert_eq!(refiner.randomness(), 0.125);
        assert!(!refiner.would_exceed_recommended());
    }

    #[test]
    fn refiner_flags_oversized_next_step() {
        let refiner = Refiner::new(Grid::square(513), 0.1, 0.5);
        assert!(refiner.would_exceed_recommended());
    }

    #[test]
    fn refiner_rejects_empty_grid() {
        let mut refiner = Refiner::new(Grid::new(0, 0, 0.0), 0.5, 0.5);
        assert!(!refiner.would_exceed_recommended());
        assert!(matches!(refiner.refine(&mut StdRng::seed_from_u64(1)), Err(Error::EmptyGrid)));
    }
}
