//! Window size (scale) selection.
//!
//! Scales are either generated as a log2-spaced integer sequence between
//! [`MIN_DEFAULT_SCALE`] and a tenth of the series length, or taken from an
//! explicit list. Either way the result is validated against the series length.

use crate::config::ScaleSpec;
use crate::errors::{DfaError, DfaResult, ScaleViolation};
use crate::math_utils::expspace;
use log::debug;

/// Smallest window size of a generated scale sequence.
pub const MIN_DEFAULT_SCALE: usize = 10;

/// Divisor of the series length giving the largest generated window size,
/// which also leaves at least ten windows to average over.
pub const DEFAULT_SCALE_DIVISOR: usize = 10;

/// Derive the set of window sizes for a series of length `n`.
///
/// * [`ScaleSpec::Default`] generates `n / 10` log-spaced candidates.
/// * [`ScaleSpec::Count`] generates the given number of log-spaced candidates.
/// * [`ScaleSpec::List`] is used as given.
///
/// Generated candidates are sorted and deduplicated. The result must hold at
/// least two distinct scales, each within `[2, n - 1]`.
///
/// # Example
/// ```rust
/// use fractal_dfa::{scales::find_scales, ScaleSpec};
///
/// let scales = find_scales(1000, &ScaleSpec::Count(4)).unwrap();
/// assert_eq!(scales, vec![10, 22, 46, 100]);
/// ```
pub fn find_scales(n: usize, spec: &ScaleSpec) -> DfaResult<Vec<usize>> {
    let scales = match spec {
        ScaleSpec::Default => generate_scales(n, n / DEFAULT_SCALE_DIVISOR),
        ScaleSpec::Count(count) => generate_scales(n, *count),
        ScaleSpec::List(scales) => scales.clone(),
    };

    validate_scales(n, &scales)?;
    debug!("Selected {} scales for series of length {}: {:?}", scales.len(), n, scales);
    Ok(scales)
}

/// Log-spaced candidates between [`MIN_DEFAULT_SCALE`] and `n / 10`, sorted and unique.
pub fn generate_scales(n: usize, count: usize) -> Vec<usize> {
    let mut scales = expspace(
        MIN_DEFAULT_SCALE as f64,
        (n / DEFAULT_SCALE_DIVISOR) as f64,
        count,
    );
    scales.sort_unstable();
    scales.dedup();
    scales
}

/// Check a scale set against the validity rules for a series of length `n`.
pub fn validate_scales(n: usize, scales: &[usize]) -> DfaResult<()> {
    let invalid = |reason| DfaError::InvalidScale {
        reason,
        series_length: n,
    };

    let mut distinct = scales.to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    match (distinct.first(), distinct.last()) {
        _ if distinct.len() < 2 => Err(invalid(ScaleViolation::TooFewScales {
            distinct: distinct.len(),
        })),
        (Some(&min), _) if min < 2 => Err(invalid(ScaleViolation::TooSmall { scale: min })),
        (_, Some(&max)) if max >= n => Err(invalid(ScaleViolation::TooLarge { scale: max })),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scales_are_sorted_unique_and_bounded() {
        let n = 1000;
        let scales = find_scales(n, &ScaleSpec::Default).unwrap();

        assert!(scales.len() >= 2);
        assert!(scales.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(scales[0], 10);
        assert_eq!(*scales.last().unwrap(), 100);
        assert!(scales.iter().all(|&s| s >= 2 && s < n));
    }

    #[test]
    fn test_default_count_collapses_duplicates() {
        // 100 candidates between 10 and 100 cannot all be distinct integers
        let scales = generate_scales(1000, 100);
        assert!(scales.len() <= 91);
        assert!(scales.len() > 2);
    }

    #[test]
    fn test_explicit_count() {
        let scales = find_scales(1000, &ScaleSpec::Count(4)).unwrap();
        assert_eq!(scales, vec![10, 22, 46, 100]);
    }

    #[test]
    fn test_scale_selection_is_idempotent() {
        let first = find_scales(777, &ScaleSpec::Default).unwrap();
        let second = find_scales(777, &ScaleSpec::Default).unwrap();
        assert_eq!(first, second);

        let spec = ScaleSpec::Count(7);
        assert_eq!(find_scales(5000, &spec).unwrap(), find_scales(5000, &spec).unwrap());
    }

    #[test]
    fn test_explicit_list_kept_in_caller_order() {
        let scales = find_scales(100, &ScaleSpec::List(vec![20, 5, 10])).unwrap();
        assert_eq!(scales, vec![20, 5, 10]);
    }

    #[test]
    fn test_scale_below_two_rejected() {
        let result = find_scales(100, &ScaleSpec::List(vec![1, 5]));
        assert!(matches!(
            result,
            Err(DfaError::InvalidScale {
                reason: ScaleViolation::TooSmall { scale: 1 },
                series_length: 100,
            })
        ));
    }

    #[test]
    fn test_scale_exceeding_length_rejected() {
        let result = find_scales(100, &ScaleSpec::List(vec![5, 200]));
        assert!(matches!(
            result,
            Err(DfaError::InvalidScale {
                reason: ScaleViolation::TooLarge { scale: 200 },
                ..
            })
        ));

        // equal to the length is also invalid
        assert!(find_scales(100, &ScaleSpec::List(vec![5, 100])).is_err());
    }

    #[test]
    fn test_single_distinct_scale_rejected() {
        let result = find_scales(100, &ScaleSpec::List(vec![10, 10]));
        assert!(matches!(
            result,
            Err(DfaError::InvalidScale {
                reason: ScaleViolation::TooFewScales { distinct: 1 },
                ..
            })
        ));
    }

    #[test]
    fn test_short_series_has_no_default_scales() {
        // n / 10 = 0 candidates
        assert!(matches!(
            find_scales(9, &ScaleSpec::Default),
            Err(DfaError::InvalidScale {
                reason: ScaleViolation::TooFewScales { distinct: 0 },
                ..
            })
        ));

        // a single candidate is not enough either
        assert!(find_scales(15, &ScaleSpec::Default).is_err());
    }
}
