//! Fluctuation function estimation.
//!
//! Two formulas share the same segment/trend input:
//!
//! - **Monofractal**: classic RMS-DFA, `F(s) = sqrt(mean_v mean_i r_vi²)`.
//! - **Multifractal**: `F_q(s) = (mean_v var_v^(q/2))^(1/q)` for every exponent q.
//!
//! Segments with zero residual variance make `var^(q/2)` infinite for negative
//! q. Such values are not errors: they propagate as `0`, `inf` or NaN entries
//! and the regression downstream turns them into NaN slopes.

use crate::segments::{SegmentBatch, TrendBatch};
use nalgebra::DMatrix;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fluctuation formula, chosen once per analysis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FluctuationStrategy {
    /// Root mean square of the detrended profile (q = 2 implied)
    Monofractal,
    /// q-th order generalized fluctuation of the segment variances
    Multifractal,
}

impl FluctuationStrategy {
    /// Strategy for the multifractal flag of a configuration.
    pub fn from_multifractal(multifractal: bool) -> Self {
        if multifractal {
            FluctuationStrategy::Multifractal
        } else {
            FluctuationStrategy::Monofractal
        }
    }

    /// Fluctuation values of one scale, one entry per exponent.
    ///
    /// The monofractal value does not depend on q and is repeated in every column.
    pub fn fluctuation(&self, segments: &SegmentBatch, trends: &TrendBatch, q: &[f64]) -> Vec<f64> {
        let detrended = segments.detrended(trends);
        match self {
            FluctuationStrategy::Monofractal => {
                vec![rms_fluctuation(&detrended); q.len()]
            }
            FluctuationStrategy::Multifractal => {
                let variances = segment_variances(&detrended);
                q.iter()
                    .map(|&q| generalized_fluctuation(&variances, q))
                    .collect()
            }
        }
    }
}

/// Root mean square over all segments of a `segments x window` residual matrix.
pub fn rms_fluctuation(detrended: &DMatrix<f64>) -> f64 {
    let window = detrended.ncols() as f64;
    let segment_means: Vec<f64> = detrended
        .row_iter()
        .map(|row| row.iter().map(|r| r * r).sum::<f64>() / window)
        .collect();
    (segment_means.iter().sum::<f64>() / segment_means.len() as f64).sqrt()
}

/// Population variance (ddof = 0) of every row.
pub fn segment_variances(detrended: &DMatrix<f64>) -> Vec<f64> {
    let window = detrended.ncols() as f64;
    detrended
        .row_iter()
        .map(|row| {
            let mean = row.sum() / window;
            row.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / window
        })
        .collect()
}

/// `(mean_v var_v^(q/2))^(1/q)` with IEEE semantics for zero variances.
pub fn generalized_fluctuation(variances: &[f64], q: f64) -> f64 {
    let moment = variances.iter().map(|v| v.powf(q / 2.0)).sum::<f64>() / variances.len() as f64;
    moment.powf(1.0 / q)
}

/// Fluctuation values for every scale (rows) and exponent (columns).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FluctuationMatrix {
    data: DMatrix<f64>,
}

impl FluctuationMatrix {
    /// Assemble the matrix from one row per scale.
    ///
    /// All rows must have `columns` entries.
    pub fn from_rows(rows: &[Vec<f64>], columns: usize) -> Self {
        Self {
            data: DMatrix::from_fn(rows.len(), columns, |i, j| rows[i][j]),
        }
    }

    /// Wrap a `scales x exponents` matrix.
    pub fn from_matrix(data: DMatrix<f64>) -> Self {
        Self { data }
    }

    /// Number of scales.
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of exponents.
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// Whether no scale produced a row.
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Fluctuation at scale `row` and exponent `col`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    /// Fluctuations of every scale for exponent `col`.
    pub fn column(&self, col: usize) -> Vec<f64> {
        self.data.column(col).iter().copied().collect()
    }

    /// Fluctuations of every exponent for scale `row`.
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.data.row(row).iter().copied().collect()
    }

    /// Underlying matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }
}
