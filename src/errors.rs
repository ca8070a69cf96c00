//! Error types and validation functions for detrended fluctuation analysis.
//!
//! Every fatal precondition of the analysis maps to one variant of [`DfaError`].
//! Numerical anomalies that are expected during the computation (log of zero,
//! zero raised to a negative power) are never errors: they surface as NaN or
//! infinite values and are handled by the NaN-aware reductions downstream.

use thiserror::Error;

/// Error types for (multifractal) detrended fluctuation analysis.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DfaError {
    /// The input signal has more than one dimension.
    #[error("Multidimensional inputs are not supported: got shape {rows}x{cols}")]
    Dimensionality {
        /// Number of rows of the offending input
        rows: usize,
        /// Number of columns of the offending input
        cols: usize,
    },

    /// The set of scales (window sizes) violates a validity rule.
    #[error("Invalid scale: {reason}")]
    InvalidScale {
        /// Which rule was violated
        reason: ScaleViolation,
        /// Length of the analysed series
        series_length: usize,
    },

    /// A fractal exponent q is NaN or infinite.
    #[error("Fractal exponent q at index {index} is not finite: {value}")]
    NonFiniteExponent {
        /// Position of the exponent in the caller's sequence
        index: usize,
        /// Offending value
        value: f64,
    },

    /// The fluctuation matrix does not have one column per exponent.
    #[error("Fluctuation function and q powers don't match in dimension: {columns} columns for {exponents} exponents")]
    DimensionMismatch {
        /// Number of columns of the fluctuation matrix
        columns: usize,
        /// Number of exponents
        exponents: usize,
    },

    /// Every supplied exponent fell inside the excluded band around zero.
    #[error("No fractal exponent left after removing values with |q| <= {threshold}")]
    EmptyExponentSet {
        /// Half-width of the excluded band
        threshold: f64,
    },

    /// Invalid parameter value for analysis configuration.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },

    /// Numerical computation error that cannot be represented as NaN.
    #[error("Numerical computation failed: {reason}")]
    NumericalError {
        /// Detailed reason for numerical failure
        reason: String,
    },
}

/// The rule broken by an invalid scale set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleViolation {
    /// Fewer than two distinct window sizes.
    TooFewScales {
        /// Number of distinct scales found
        distinct: usize,
    },
    /// A window holds fewer than two points.
    TooSmall {
        /// Smallest scale found
        scale: usize,
    },
    /// A window is at least as long as the series.
    TooLarge {
        /// Largest scale found
        scale: usize,
    },
}

impl std::fmt::Display for ScaleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleViolation::TooFewScales { distinct } => write!(
                f,
                "more than one window is needed, got {} distinct window(s). Increase 'scale'",
                distinct
            ),
            ScaleViolation::TooSmall { scale } => write!(
                f,
                "there must be at least 2 data points in each window, got {}. Decrease 'scale'",
                scale
            ),
            ScaleViolation::TooLarge { scale } => write!(
                f,
                "the window cannot contain more data points than the time series, got {}. Decrease 'scale'",
                scale
            ),
        }
    }
}

/// Result type for detrended fluctuation analysis operations.
pub type DfaResult<T> = Result<T, DfaError>;

/// Validates that every value in a slice is finite, reporting the first offender
/// as a [`DfaError::NonFiniteExponent`].
///
/// # Example
/// ```rust
/// use fractal_dfa::errors::validate_finite_exponents;
///
/// assert!(validate_finite_exponents(&[-1.0, 2.0]).is_ok());
/// assert!(validate_finite_exponents(&[1.0, f64::NAN]).is_err());
/// ```
pub fn validate_finite_exponents(q: &[f64]) -> DfaResult<()> {
    match q.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(DfaError::NonFiniteExponent { index, value }),
        None => Ok(()),
    }
}

/// Validates that a fluctuation matrix width agrees with the exponent count.
pub fn validate_dimensions(columns: usize, exponents: usize) -> DfaResult<()> {
    if columns != exponents {
        return Err(DfaError::DimensionMismatch { columns, exponents });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_finite_exponents_reports_first_offender() {
        let result = validate_finite_exponents(&[1.0, f64::INFINITY, f64::NAN]);

        match result {
            Err(DfaError::NonFiniteExponent { index, value }) => {
                assert_eq!(index, 1);
                assert!(value.is_infinite());
            }
            other => panic!("Expected NonFiniteExponent, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_finite_exponents_empty() {
        assert!(validate_finite_exponents(&[]).is_ok());
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(validate_dimensions(3, 3).is_ok());
        assert_eq!(
            validate_dimensions(1, 6),
            Err(DfaError::DimensionMismatch {
                columns: 1,
                exponents: 6
            })
        );
    }

    #[test]
    fn test_error_display_formatting() {
        let error = DfaError::InvalidScale {
            reason: ScaleViolation::TooSmall { scale: 1 },
            series_length: 100,
        };
        let message = format!("{}", error);
        assert!(message.contains("Invalid scale"));
        assert!(message.contains("at least 2 data points"));

        let error = DfaError::InvalidScale {
            reason: ScaleViolation::TooLarge { scale: 200 },
            series_length: 100,
        };
        assert!(format!("{}", error).contains("cannot contain more data points"));

        let error = DfaError::Dimensionality { rows: 3, cols: 4 };
        assert!(format!("{}", error).contains("3x4"));

        let error = DfaError::DimensionMismatch {
            columns: 2,
            exponents: 5,
        };
        let message = format!("{}", error);
        assert!(message.contains("don't match"));
        assert!(message.contains('2'));
        assert!(message.contains('5'));
    }
}
