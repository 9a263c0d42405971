/// Sample autocorrelation of `values` at `lag`.
///
/// `Σ (x_i − μ)(x_{i+lag} − μ) / Σ (x_i − μ)²`. Returns NaN for a constant
/// sequence or when `lag` leaves no pairs.
pub fn lag_autocorrelation(values: &[f64], lag: usize) -> f64 {
    if lag >= values.len() {
        return f64::NAN;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    if variance < 1e-300 {
        return f64::NAN;
    }
    let covariance: f64 = values
        .iter()
        .zip(&values[lag..])
        .map(|(a, b)| (a - mean) * (b - mean))
        .sum();
    covariance / variance
}
