//! Variogram-based Hurst exponent estimation.
//!
//! Structure function D(h) = mean[(z(x+h) − z(x))²] over row and column pairs
//! at lags 2–8, fitted as D(h) = c · h^(2H) by OLS in log-log space. Larger
//! diamond-square roughness factors give smaller H.
use crate::grid::Grid;

pub struct HurstResult {
    /// Estimated Hurst exponent. NaN if the grid is flat.
    pub h: f64,
    /// Power-law fit quality R².
    pub r_squared: f64,
}

const LAGS: [usize; 7] = [2, 3, 4, 5, 6, 7, 8];

/// Compute the Hurst exponent from a short-lag isotropic variogram.
///
/// Returns `HurstResult { h: NaN, r_squared: 0.0 }` when the grid is flat
/// (max gamma < 1e-12).
pub fn compute_hurst(grid: &Grid) -> HurstResult {
    let mut gamma = [0f64; LAGS.len()];

    for (li, &lag) in LAGS.iter().enumerate() {
        let mut sum = 0f64;
        let mut count = 0u64;

        // Horizontal: pairs (r, c) and (r, c+lag)
        for r in 0..grid.rows {
            for c in 0..grid.cols.saturating_sub(lag) {
                let d = grid.get(r, c) - grid.get(r, c + lag);
                sum += d * d;
                count += 1;
            }
        }

        // Vertical: pairs (r, c) and (r+lag, c)
        for r in 0..grid.rows.saturating_sub(lag) {
            for c in 0..grid.cols {
                let d = grid.get(r, c) - grid.get(r + lag, c);
                sum += d * d;
                count += 1;
            }
        }

        gamma[li] = if count > 0 { sum / count as f64 } else { 0.0 };
    }

    let max_gamma = gamma.iter().cloned().fold(0f64, f64::max);
    if max_gamma < 1e-12 || gamma.iter().any(|&g| g <= 0.0) {
        return HurstResult { h: f64::NAN, r_squared: 0.0 };
    }

    // OLS fit: log(gamma) = 2H * log(lag) + c
    let n = LAGS.len() as f64;
    let xs: Vec<f64> = LAGS.iter().map(|&h| (h as f64).ln()).collect();
    let ys: Vec<f64> = gamma.iter().map(|&g| g.ln()).collect();

    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xx: f64 = xs.iter().map(|x| x * x).sum();
    let sum_xy: f64 = xs.iter().zip(ys.iter()).map(|(x, y)| x * y).sum();

    let denom = n * sum_xx - sum_x * sum_x;
    let slope = if denom.abs() < 1e-12 { 0.0 } else { (n * sum_xy - sum_x * sum_y) / denom };
    let intercept = (sum_y - slope * sum_x) / n;

    let y_mean = sum_y / n;
    let ss_tot: f64 = ys.iter().map(|y| (y - y_mean).powi(2)).sum();
    let ss_res: f64 = xs
        .iter()
        .zip(ys.iter())
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();
    let r_squared = if ss_tot < 1e-12 { 0.0 } else { 1.0 - ss_res / ss_tot };

    HurstResult { h: slope / 2.0, r_squared }
}
