//! Log-log scaling regression.
//!
//! For each exponent q the slope of `log2(F_q(s))` against `log2(s)` is the
//! generalized Hurst exponent h(q). Zero or non-finite fluctuations make the
//! fit undefined and produce a NaN slope for that exponent only.

use crate::errors::{validate_dimensions, DfaResult};
use crate::fluctuation::FluctuationMatrix;
use crate::math_utils::polyfit_line;
use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generalized Hurst exponents, unwrapped to a scalar when only one exponent
/// was analysed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Slopes {
    /// The slope of the only exponent
    Single(f64),
    /// One slope per exponent, in exponent order
    PerExponent(Vec<f64>),
}

impl Slopes {
    /// Wrap per-exponent slopes, unwrapping a single value.
    pub fn from_vec(mut slopes: Vec<f64>) -> Self {
        if slopes.len() == 1 {
            Slopes::Single(slopes.remove(0))
        } else {
            Slopes::PerExponent(slopes)
        }
    }

    /// The scalar slope, if only one exponent was analysed.
    pub fn scalar(&self) -> Option<f64> {
        match self {
            Slopes::Single(slope) => Some(*slope),
            Slopes::PerExponent(_) => None,
        }
    }

    /// All slopes in exponent order.
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Slopes::Single(slope) => std::slice::from_ref(slope),
            Slopes::PerExponent(slopes) => slopes,
        }
    }

    /// Number of slopes.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether no exponent was analysed.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// A fitted log-log line `log2(F) = slope * log2(s) + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalingFit {
    /// Generalized Hurst exponent h(q)
    pub slope: f64,
    /// Intercept of the line in log2 space
    pub intercept: f64,
}

impl ScalingFit {
    /// Fluctuation predicted by the line at a scale.
    pub fn predict(&self, scale: usize) -> f64 {
        (self.slope * (scale as f64).log2() + self.intercept).exp2()
    }
}

/// Fit one log-log line per exponent column.
///
/// # Errors
/// [`crate::DfaError::DimensionMismatch`] when the matrix does not have one
/// column per exponent.
pub fn fit_scaling(
    scales: &[usize],
    fluctuations: &FluctuationMatrix,
    q: &[f64],
) -> DfaResult<Vec<ScalingFit>> {
    validate_dimensions(fluctuations.ncols(), q.len())?;

    let log_scales: Vec<f64> = scales.iter().map(|&s| (s as f64).log2()).collect();

    let fits: Vec<ScalingFit> = (0..q.len())
        .map(|col| {
            let log_fluctuations: Vec<f64> = fluctuations
                .column(col)
                .iter()
                .map(|f| f.log2())
                .collect();
            let (slope, intercept) = polyfit_line(&log_scales, &log_fluctuations);
            ScalingFit { slope, intercept }
        })
        .collect();

    for (fit, q) in fits.iter().zip(q) {
        if !fit.slope.is_finite() {
            warn!("Scaling exponent for q = {} is undefined (zero or non-finite fluctuations)", q);
        }
    }

    Ok(fits)
}
