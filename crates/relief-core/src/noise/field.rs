//! Sampling gradient noise over a rectangular view.
//!
//! Cell `(r, c)` of a `width × height` map reads the noise at
//! `(scale·c/width + start_x, scale·r/height + start_y)`. [`shape_heights`]
//! then normalises the map, bends it with an exponent and scales it to a
//! target height, which is how the raw noise becomes a terrain heightmap.
use serde::{Deserialize, Serialize};

use super::fbm::Fbm;
use super::gradient::{CoordinateGradients, GradientNoise};
use super::weight::WeightPolicy;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::range::{map_to_range_checked, RangeDiagnostic};

/// View and shaping parameters for a noise heightmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseMapParams {
    pub width: usize,
    pub height: usize,
    /// Lattice cells spanned by the view along each axis.
    pub scale: f64,
    pub start_x: f64,
    pub start_y: f64,
    /// Exponent applied after normalising to `[0, 1]`. Above 1 flattens lowlands.
    pub exponent: f64,
    /// Height of the highest cell after shaping.
    pub height_scale: f64,
    pub weighting: WeightPolicy,
    /// Octaves of [`Fbm`]; 1 samples the engine directly.
    pub octaves: u32,
    /// Hurst exponent of the octave sum.
    pub hurst: f64,
}

impl Default for NoiseMapParams {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            scale: 8.0,
            start_x: 0.0,
            start_y: 0.0,
            exponent: 1.0,
            height_scale: 1.0,
            weighting: WeightPolicy::SumOfSquares,
            octaves: 1,
            hurst: 0.75,
        }
    }
}

/// Evaluate `noise(x, y)` at every cell of the view described by `params`.
///
/// With the `threading` feature rows are sampled in parallel; the output is
/// identical either way.
pub fn sample_noise_map<F>(params: &NoiseMapParams, noise: F) -> Result<Grid>
where
    F: Fn(f64, f64) -> Result<f64> + Sync,
{
    if params.width == 0 || params.height == 0 {
        return Err(Error::EmptyGrid);
    }
    let mut grid = Grid::new(params.height, params.width, 0.0);
    let fill_row = |r: usize, row: &mut [f64]| -> Result<()> {
        let y = params.scale * r as f64 / params.height as f64 + params.start_y;
        for (c, cell) in row.iter_mut().enumerate() {
            let x = params.scale * c as f64 / params.width as f64 + params.start_x;
            *cell = noise(x, y)?;
        }
        Ok(())
    };

    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        grid.data
            .par_chunks_mut(params.width)
            .enumerate()
            .try_for_each(|(r, row)| fill_row(r, row))?;
    }
    #[cfg(not(feature = "threading"))]
    {
        for (r, row) in grid.data.chunks_mut(params.width).enumerate() {
            fill_row(r, row)?;
        }
    }

    Ok(grid)
}

/// Normalise `grid` to `[0, 1]`, raise to `exponent`, scale to `[0, height_scale]`.
///
/// A flat grid has a single-point source range; every cell becomes 0 and the
/// diagnostic is returned.
pub fn shape_heights(grid: &mut Grid, exponent: f64, height_scale: f64) -> Option<RangeDiagnostic> {
    let lo = grid.min_height();
    let hi = grid.max_height();
    let mut diagnostic = None;
    for v in &mut grid.data {
        let mapped = map_to_range_checked(*v, lo, hi, 0.0, 1.0);
        diagnostic = diagnostic.or(mapped.diagnostic);
        *v = mapped.value.powf(exponent) * height_scale;
    }
    diagnostic
}

/// Sample and shape a complete noise heightmap.
pub fn noise_height_map(params: &NoiseMapParams) -> Result<(Grid, Option<RangeDiagnostic>)> {
    let engine = GradientNoise::new(CoordinateGradients::default(), params.weighting);
    let mut grid = if params.octaves > 1 {
        let fbm = Fbm::with_noise(engine, params.hurst, params.octaves);
        sample_noise_map(params, |x, y| fbm.sample(&[x, y]))?
    } else {
        sample_noise_map(params, |x, y| engine.sample(&[x, y]))?
    };
    let diagnostic = shape_heights(&mut grid, params.exponent, params.height_scale);
    if let Some(d) = diagnostic {
        tracing::warn!(?d, "noise map is flat; shaped to zero");
    }
    Ok((grid, diagnostic))
}
