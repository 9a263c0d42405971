use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A rectangular field of heights, row-major.
///
/// Diamond-square output is always square with side `2^k + 1`; grids parsed from
/// external literals may be any non-empty rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Row-major height values.
    pub data: Vec<f64>,
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    /// Create a grid filled with the given value.
    pub fn new(rows: usize, cols: usize, fill: f64) -> Self {
        Self { data: vec![fill; rows * cols], rows, cols }
    }

    /// Create a square grid of zeros.
    pub fn square(side: usize) -> Self {
        Self::new(side, side, 0.0)
    }

    /// Build a grid from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(Error::EmptyGrid);
        }
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(Error::RaggedGrid { row, expected: cols, actual: values.len() });
            }
        }
        let n_rows = rows.len();
        Ok(Self { data: rows.into_iter().flatten().collect(), rows: n_rows, cols })
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols.max(1)).map(<[f64]>::to_vec).collect()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: f64) {
        self.data[row * self.cols + col] = val;
    }

    /// True for a square grid whose side is `2^k + 1`.
    pub fn is_fractal_side(&self) -> bool {
        self.rows == self.cols && (self.rows == 1 || (self.rows > 1 && (self.rows - 1).is_power_of_two()))
    }

    /// Samples at even row and even column indices, i.e. the grid this one was
    /// refined from by [`crate::fractal::increase_definition`].
    pub fn even_subgrid(&self) -> Grid {
        let rows = self.rows.div_ceil(2);
        let cols = self.cols.div_ceil(2);
        let mut out = Grid::new(rows, cols, 0.0);
        for r in 0..rows {
            for c in 0..cols {
                out.set(r, c, self.get(2 * r, 2 * c));
            }
        }
        out
    }

    /// Bilinear sample at normalised coordinates, `u` across columns and `v`
    /// down rows, both in `[0, 1]`. Returns `None` outside that square.
    pub fn sample(&self, u: f64, v: f64) -> Option<f64> {
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) || self.data.is_empty() {
            return None;
        }

        let fx = u * (self.cols - 1) as f64;
        let fy = v * (self.rows - 1) as f64;

        let x0 = fx.floor() as usize;
        let y0 = fy.floor() as usize;
        let x1 = (x0 + 1).min(self.cols - 1);
        let y1 = (y0 + 1).min(self.rows - 1);

        let tx = fx - x0 as f64;
        let ty = fy - y0 as f64;

        let v00 = self.get(y0, x0);
        let v10 = self.get(y0, x1);
        let v01 = self.get(y1, x0);
        let v11 = self.get(y1, x1);

        Some(
            v00 * (1.0 - tx) * (1.0 - ty)
                + v10 * tx * (1.0 - ty)
                + v01 * (1.0 - tx) * ty
                + v11 * tx * ty,
        )
    }

    pub fn min_height(&self) -> f64 {
        self.data.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    pub fn max_height(&self) -> f64 {
        self.data.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }
}
