//! Singularity spectrum of a multifractal series.
//!
//! From the generalized Hurst exponents h(q):
//!
//! - scaling exponents `τ(q) = q·h(q) - 1`
//! - singularity strength `H(q) = dτ/dq` (numerical gradient)
//! - singularity dimension `D(q) = q·H(q) - τ(q)`
//!
//! The gradient is taken over the exponents sorted in ascending order and the
//! results are mapped back to the caller's exponent order. Estimates rarely
//! match theory exactly; a deviation of ±0.25 is usual.

use crate::math_utils::{gradient, nan_argmax, nan_max, nan_mean, nan_min};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scalar features of a singularity spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct SpectrumSummary {
    /// Width of the singularity strength, `max(H) - min(H)`
    pub exp_range: f64,
    /// Mean singularity strength
    pub exp_mean: f64,
    /// `max(D) - min(D)`
    pub dim_range: f64,
    /// Mean singularity dimension
    pub dim_mean: f64,
    /// Singularity strength at which the dimension peaks
    pub h_max: f64,
    /// Spectrum width
    pub h_delta: f64,
    /// Asymmetry ratio `(min(H) - HMax) / HDelta`, about 0.5 when symmetric
    #[cfg_attr(feature = "serde", serde(rename = "HAR"))]
    pub h_ar: f64,
}

impl SpectrumSummary {
    /// Column names of the tabular record.
    pub const COLUMNS: [&'static str; 7] = [
        "ExpRange", "ExpMean", "DimRange", "DimMean", "HMax", "HDelta", "HAR",
    ];

    /// The summary as a single named row, in [`Self::COLUMNS`] order.
    pub fn to_row(&self) -> [(&'static str, f64); 7] {
        let values = [
            self.exp_range,
            self.exp_mean,
            self.dim_range,
            self.dim_mean,
            self.h_max,
            self.h_delta,
            self.h_ar,
        ];
        let mut row = [("", 0.0); 7];
        for (slot, (name, value)) in row.iter_mut().zip(Self::COLUMNS.iter().zip(values)) {
            *slot = (*name, value);
        }
        row
    }
}

/// Singularity spectrum, every vector indexed like the exponents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SingularitySpectrum {
    /// Generalized Hurst exponents h(q)
    pub h: Vec<f64>,
    /// Scaling exponents τ(q)
    pub tau: Vec<f64>,
    /// Singularity strength H(q)
    pub singularity_strength: Vec<f64>,
    /// Singularity dimension D(q)
    pub singularity_dimension: Vec<f64>,
    /// Scalar features
    pub summary: SpectrumSummary,
}

/// Derive the singularity spectrum from exponents and their slopes.
///
/// `q` and `slopes` must have the same length. With fewer than two exponents
/// the gradient is undefined and H, D and every summary are NaN.
pub fn singularity_spectrum(q: &[f64], slopes: &[f64]) -> SingularitySpectrum {
    let tau: Vec<f64> = q.iter().zip(slopes).map(|(q, h)| q * h - 1.0).collect();

    let mut order: Vec<usize> = (0..q.len()).collect();
    order.sort_by(|&a, &b| q[a].total_cmp(&q[b]));

    let sorted_q: Vec<f64> = order.iter().map(|&i| q[i]).collect();
    let sorted_tau: Vec<f64> = order.iter().map(|&i| tau[i]).collect();
    let dtau = gradient(&sorted_tau);
    let dq = gradient(&sorted_q);

    let mut strength = vec![f64::NAN; q.len()];
    for ((&index, dtau), dq) in order.iter().zip(&dtau).zip(&dq) {
        strength[index] = dtau / dq;
    }

    let dimension: Vec<f64> = q
        .iter()
        .zip(&strength)
        .zip(&tau)
        .map(|((q, h), tau)| q * h - tau)
        .collect();

    let summary = summarize(&strength, &dimension);

    SingularitySpectrum {
        h: slopes.to_vec(),
        tau,
        singularity_strength: strength,
        singularity_dimension: dimension,
        summary,
    }
}

/// NaN-aware summary statistics of a spectrum.
pub fn summarize(strength: &[f64], dimension: &[f64]) -> SpectrumSummary {
    let h_min = nan_min(strength);
    let h_top = nan_max(strength);
    let h_max = nan_argmax(dimension)
        .map(|i| strength[i])
        .unwrap_or(f64::NAN);
    let h_delta = h_top - h_min;

    SpectrumSummary {
        exp_range: h_top - h_min,
        exp_mean: nan_mean(strength),
        dim_range: nan_max(dimension) - nan_min(dimension),
        dim_mean: nan_mean(dimension),
        h_max,
        h_delta,
        h_ar: (h_min - h_max) / h_delta,
    }
}
