//! Text literals for externally supplied seed data.
//!
//! Grids are written row by row: rows separated by `;`, values by `,`.
//! Whitespace and `[]{}` brackets are ignored, so `"{0, 1;\n 1, 0}"` and
//! `"[[0,1];[1,0]]"` both read as a 2×2 grid.
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::profile::Profile;

fn strip(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '[' | ']' | '{' | '}'))
        .collect()
}

fn parse_values(row: &str, whole: &str) -> Result<Vec<f64>> {
    row.split(',')
        .map(|v| {
            v.parse::<f64>().map_err(|e| Error::Parse { input: whole.to_string(), reason: format!("{v:?}: {e}") })
        })
        .collect()
}

/// Parse a grid literal such as `"0,1;\n1,0"`.
///
/// A trailing `;` is allowed. Rows of different lengths are rejected.
pub fn parse_grid_literal(input: &str) -> Result<Grid> {
    let cleaned = strip(input);
    let rows = cleaned
        .split(';')
        .filter(|row| !row.is_empty())
        .map(|row| parse_values(row, input))
        .collect::<Result<Vec<_>>>()?;
    Grid::from_rows(rows)
}

/// Parse a comma-separated profile literal such as `"{ 2, 2, 1.5, 1 }"`.
pub fn parse_profile_literal(input: &str) -> Result<Profile> {
    let cleaned = strip(input);
    if cleaned.is_empty() {
        return Err(Error::EmptyProfile);
    }
    Ok(Profile::new(parse_values(&cleaned, input)?))
}
