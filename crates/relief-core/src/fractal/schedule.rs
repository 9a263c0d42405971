//! Mutation-rate schedules for midpoint displacement.
use serde::{Deserialize, Serialize};

/// Per-iteration mutation rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MutationSchedule {
    /// One rate per iteration, in order.
    Explicit { rates: Vec<f64> },
    /// `count` rates starting at `initial`, each `2^−roughness` times the previous.
    /// `roughness = 1` halves the rate every iteration.
    Geometric { initial: f64, roughness: f64, count: usize },
}

impl Default for MutationSchedule {
    fn default() -> Self {
        Self::Geometric { initial: 1.0, roughness: 1.0, count: 6 }
    }
}

impl MutationSchedule {
    /// Number of iterations this schedule drives.
    pub fn len(&self) -> usize {
        match self {
            Self::Explicit { rates } => rates.len(),
            Self::Geometric { count, .. } => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rate for iteration `i`. Past the end of an explicit list the last rate repeats;
    /// an empty list yields 0.
    pub fn rate_at(&self, i: usize) -> f64 {
        match self {
            Self::Explicit { rates } => rates.get(i).or(rates.last()).copied().unwrap_or(0.0),
            Self::Geometric { initial, roughness, .. } => initial * 2f64.powf(-roughness * i as f64),
        }
    }

    pub fn rates(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.rate_at(i)).collect()
    }
}
