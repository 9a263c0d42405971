/// Caller-side contract violations. Degenerate numeric ranges are never errors;
/// they resolve to defined values in [`crate::range`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("noise point must have at least one dimension")]
    EmptyPoint,

    #[error("too many dimensions: {dims} (max {max})")]
    TooManyDimensions { dims: usize, max: usize },

    #[error("grid must contain at least one cell")]
    EmptyGrid,

    #[error("ragged grid: row {row} has {actual} values, expected {expected}")]
    RaggedGrid { row: usize, expected: usize, actual: usize },

    #[error("profile must contain at least one sample")]
    EmptyProfile,

    #[error("size factor {size_factor} overflows the grid side")]
    SizeFactorTooLarge { size_factor: u32 },

    #[error("cannot parse {input:?}: {reason}")]
    Parse { input: String, reason: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, Error>;
