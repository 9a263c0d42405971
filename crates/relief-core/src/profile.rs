use serde::{Deserialize, Serialize};

/// A 1D height profile produced by midpoint displacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile {
    pub heights: Vec<f64>,
}

impl Profile {
    pub fn new(heights: Vec<f64>) -> Self {
        Self { heights }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.heights
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.heights
    }

    pub fn min_height(&self) -> f64 {
        self.heights.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    pub fn max_height(&self) -> f64 {
        self.heights.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl From<Vec<f64>> for Profile {
    fn from(heights: Vec<f64>) -> Self {
        Self { heights }
    }
}
