//! Fractal exponent (q) sanitizing.
//!
//! The generalized fluctuation function does not converge for q close to zero,
//! so every exponent inside `[-0.1, 0.1]` is removed. The caller's ordering of
//! the remaining exponents is preserved.

use crate::config::ExponentSpec;
use crate::errors::{validate_finite_exponents, DfaError, DfaResult};
use log::{debug, warn};

/// Half-width of the excluded band around q = 0.
pub const Q_ZERO_THRESHOLD: f64 = 0.1;

/// Exponent used by classic (monofractal) DFA.
pub const DFA_DEFAULT_Q: f64 = 2.0;

/// Default exponent spread for multifractal DFA. Zero is listed for symmetry
/// and removed by the sanitizer.
pub const MFDFA_DEFAULT_Q: [f64; 7] = [-5.0, -3.0, -1.0, 0.0, 1.0, 3.0, 5.0];

/// Normalize and validate the fractal exponents.
///
/// # Errors
/// * [`DfaError::NonFiniteExponent`] if any supplied exponent is NaN or infinite
/// * [`DfaError::EmptyExponentSet`] if no exponent survives the zero-band filter
///
/// # Example
/// ```rust
/// use fractal_dfa::{exponents::sanitize_q, ExponentSpec};
///
/// let q = sanitize_q(&ExponentSpec::List(vec![-5.0, -0.05, 0.0, 0.05, 5.0]), true).unwrap();
/// assert_eq!(q, vec![-5.0, 5.0]);
/// ```
pub fn sanitize_q(spec: &ExponentSpec, multifractal: bool) -> DfaResult<Vec<f64>> {
    let requested: Vec<f64> = match spec {
        ExponentSpec::Default if multifractal => MFDFA_DEFAULT_Q.to_vec(),
        ExponentSpec::Default => vec![DFA_DEFAULT_Q],
        ExponentSpec::Scalar(q) => vec![*q],
        ExponentSpec::List(q) => q.clone(),
    };

    validate_finite_exponents(&requested)?;

    let q: Vec<f64> = requested
        .iter()
        .copied()
        .filter(|q| q.abs() > Q_ZERO_THRESHOLD)
        .collect();

    if q.is_empty() {
        return Err(DfaError::EmptyExponentSet {
            threshold: Q_ZERO_THRESHOLD,
        });
    }

    let removed = requested.len() - q.len();
    // The default multifractal spread always drops its zero entry.
    if removed > 0 && *spec != ExponentSpec::Default {
        warn!(
            "Removed {} fractal exponent(s) with |q| <= {}",
            removed, Q_ZERO_THRESHOLD
        );
    }
    debug!("Fractal exponents: {:?}", q);

    Ok(q)
}
