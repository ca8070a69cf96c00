//! # Analysis Configuration
//!
//! This module contains the parameters of a (multifractal) detrended fluctuation
//! analysis call: how scales and fractal exponents are chosen, whether windows
//! overlap, whether the signal is integrated, and the detrending order.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the set of window sizes is chosen.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScaleSpec {
    /// `n / 10` log-spaced scales between 10 and `n / 10`
    #[default]
    Default,
    /// The given number of log-spaced scales between 10 and `n / 10`
    Count(usize),
    /// An explicit list of window sizes, used as given
    List(Vec<usize>),
}

impl From<usize> for ScaleSpec {
    fn from(count: usize) -> Self {
        ScaleSpec::Count(count)
    }
}

impl From<Vec<usize>> for ScaleSpec {
    fn from(scales: Vec<usize>) -> Self {
        ScaleSpec::List(scales)
    }
}

impl From<&[usize]> for ScaleSpec {
    fn from(scales: &[usize]) -> Self {
        ScaleSpec::List(scales.to_vec())
    }
}

/// How the set of fractal exponents q is chosen.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExponentSpec {
    /// `q = 2` for DFA, `q = [-5, -3, -1, 1, 3, 5]` for MFDFA
    #[default]
    Default,
    /// A single exponent
    Scalar(f64),
    /// An explicit sequence of exponents
    List(Vec<f64>),
}

impl From<f64> for ExponentSpec {
    fn from(q: f64) -> Self {
        ExponentSpec::Scalar(q)
    }
}

impl From<Vec<f64>> for ExponentSpec {
    fn from(q: Vec<f64>) -> Self {
        ExponentSpec::List(q)
    }
}

impl From<&[f64]> for ExponentSpec {
    fn from(q: &[f64]) -> Self {
        ExponentSpec::List(q.to_vec())
    }
}

/// Configuration for a detrended fluctuation analysis call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DfaConfig {
    /// Window sizes to analyse
    pub scale: ScaleSpec,
    /// Use 50% overlapping windows instead of contiguous ones
    pub overlap: bool,
    /// Convert the signal to its profile (mean-centred cumulative sum) first
    pub integrate: bool,
    /// Polynomial order of the local trend, 1 for linear detrending
    pub order: usize,
    /// Compute the generalized fluctuation function and singularity spectrum
    pub multifractal: bool,
    /// Fractal exponents
    pub q: ExponentSpec,
}

impl Default for DfaConfig {
    fn default() -> Self {
        Self::dfa()
    }
}

impl DfaConfig {
    /// Classic monofractal DFA with linear detrending.
    pub fn dfa() -> Self {
        Self {
            scale: ScaleSpec::Default,
            overlap: true,
            integrate: true,
            order: 1,
            multifractal: false,
            q: ExponentSpec::Default,
        }
    }

    /// Multifractal DFA with the default symmetric exponent spread.
    pub fn mfdfa() -> Self {
        Self {
            multifractal: true,
            ..Self::dfa()
        }
    }

    /// Replace the scale selection.
    pub fn with_scale(mut self, scale: impl Into<ScaleSpec>) -> Self {
        self.scale = scale.into();
        self
    }

    /// Replace the fractal exponents.
    pub fn with_q(mut self, q: impl Into<ExponentSpec>) -> Self {
        self.q = q.into();
        self
    }

    /// Toggle overlapping windows.
    pub fn with_overlap(mut self, overlap: bool) -> Self {
        self.overlap = overlap;
        self
    }

    /// Toggle profile integration.
    pub fn with_integrate(mut self, integrate: bool) -> Self {
        self.integrate = integrate;
        self
    }

    /// Set the detrending polynomial order.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Toggle the multifractal branch.
    pub fn with_multifractal(mut self, multifractal: bool) -> Self {
        self.multifractal = multifractal;
        self
    }

    /// Check if the multifractal branch is enabled
    pub fn is_multifractal(&self) -> bool {
        self.multifractal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic_dfa() {
        let config = DfaConfig::default();
        assert_eq!(config.scale, ScaleSpec::Default);
        assert_eq!(config.q, ExponentSpec::Default);
        assert!(config.overlap);
        assert!(config.integrate);
        assert_eq!(config.order, 1);
        assert!(!config.is_multifractal());
    }

    #[test]
    fn test_builder_methods() {
        let config = DfaConfig::mfdfa()
            .with_scale(vec![10usize, 20, 40])
            .with_q(2.0)
            .with_overlap(false)
            .with_integrate(false)
            .with_order(2);

        assert!(config.is_multifractal());
        assert_eq!(config.scale, ScaleSpec::List(vec![10, 20, 40]));
        assert_eq!(config.q, ExponentSpec::Scalar(2.0));
        assert!(!config.overlap);
        assert!(!config.integrate);
        assert_eq!(config.order, 2);
    }

    #[test]
    fn test_scale_count_conversion() {
        assert_eq!(ScaleSpec::from(12usize), ScaleSpec::Count(12));
        let slice: &[usize] = &[4, 8];
        assert_eq!(ScaleSpec::from(slice), ScaleSpec::List(vec![4, 8]));
    }
}
