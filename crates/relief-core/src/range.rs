//! Affine remapping between two ranges.
//!
//! Every degenerate input resolves to a defined value; nothing here fails.

/// Why a mapping fell back to a substitute source range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeDiagnostic {
    /// `initial_min == initial_max` (finite). The source range is a single point,
    /// so every input is treated as sitting on it.
    DegenerateSource { at: f64 },
}

/// A mapped value plus the fallback that produced it, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeMapping {
    pub value: f64,
    pub diagnostic: Option<RangeDiagnostic>,
}

impl RangeMapping {
    fn clean(value: f64) -> Self {
        Self { value, diagnostic: None }
    }
}

/// Map `point` from `[initial_min, initial_max]` onto `[new_min, new_max]`,
/// reporting degenerate source ranges to the caller.
///
/// Checked in order:
/// 1. `new_max == new_min` returns `new_min`.
/// 2. infinite `initial_min` (the far negative end) saturates to `new_max`.
/// 3. infinite `initial_max` saturates to `new_min`.
/// 4. `initial_max == initial_min` returns `new_min` with
///    [`RangeDiagnostic::DegenerateSource`]. Substituting a `[0, 1]` source
///    range instead would make the result depend on `point`; here a
///    single-point source always lands on `new_min`, so
///    `map_to_range(x, 5.0, 5.0, 0.0, 1.0) == 0.0` for every `x`.
pub fn map_to_range_checked(
    point: f64,
    initial_min: f64,
    initial_max: f64,
    new_min: f64,
    new_max: f64,
) -> RangeMapping {
    if new_max == new_min {
        return RangeMapping::clean(new_min);
    }
    // Only one bound is expected to be infinite; the sign is assumed.
    if initial_min.is_infinite() {
        return RangeMapping::clean(new_max);
    }
    if initial_max.is_infinite() {
        return RangeMapping::clean(new_min);
    }
    if initial_max == initial_min {
        return RangeMapping {
            value: new_min,
            diagnostic: Some(RangeDiagnostic::DegenerateSource { at: initial_min }),
        };
    }
    RangeMapping::clean(new_min + (point - initial_min) / (initial_max - initial_min) * (new_max - new_min))
}

/// [`map_to_range_checked`] without the diagnostic. A degenerate source range is
/// still reported, as a `warn` event.
pub fn map_to_range(point: f64, initial_min: f64, initial_max: f64, new_min: f64, new_max: f64) -> f64 {
    let mapped = map_to_range_checked(point, initial_min, initial_max, new_min, new_max);
    if let Some(RangeDiagnostic::DegenerateSource { at }) = mapped.diagnostic {
        tracing::warn!(at, "source range is a single point; mapping to new_min");
    }
    mapped.value
}

/// Clamp to `[0, 1]`.
#[inline]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn affine_mapping() {
        assert_relative_eq!(map_to_range(0.5, 0.0, 1.0, 10.0, 20.0), 15.0);
        assert_relative_eq!(map_to_range(-1.0, -1.0, 1.0, 0.0, 1.0), 0.0);
        assert_relative_eq!(map_to_range(3.0, 1.0, 2.0, 0.0, 10.0), 20.0);
    }

    #[test]
    fn reversed_target_range() {
        assert_relative_eq!(map_to_range(0.25, 0.0, 1.0, 1.0, 0.0), 0.75);
    }

    #[test]
    fn point_target_returns_new_min() {
        let m = map_to_range_checked(123.0, 0.0, 1.0, 7.0, 7.0);
        assert_eq!(m.value, 7.0);
        assert!(m.diagnostic.is_none());
    }

    #[test]
    fn infinite_bounds_saturate() {
        assert_eq!(map_to_range(0.0, f64::NEG_INFINITY, 10.0, 0.0, 100.0), 100.0);
        assert_eq!(map_to_range(0.0, -10.0, f64::INFINITY, 0.0, 100.0), 0.0);
    }

    #[test]
    fn point_target_wins_over_infinite_source() {
        assert_eq!(map_to_range(0.0, f64::NEG_INFINITY, 10.0, 3.0, 3.0), 3.0);
    }

    #[test]
    fn degenerate_source_falls_back_with_diagnostic() {
        for x in [-3.0, 0.0, 0.5, 5.0, 1e9] {
            let m = map_to_range_checked(x, 5.0, 5.0, 0.0, 1.0);
            assert_eq!(m.value, 0.0);
            assert_eq!(m.diagnostic, Some(RangeDiagnostic::DegenerateSource { at: 5.0 }));
            assert_eq!(map_to_range(x, 5.0, 5.0, 0.0, 1.0), 0.0);
        }
    }

    #[test]
    fn clamp01_bounds() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.3), 0.3);
        assert_eq!(clamp01(2.0), 1.0);
    }
}
