//! Windowing of the profile and per-segment polynomial detrending.
//!
//! For every scale the working series is cut into fixed-length segments, one
//! per matrix row. Each segment then gets its own least-squares polynomial
//! trend, fitted against the sample index `0..window`.

use crate::errors::DfaResult;
use crate::math_utils::{polyfit_columns, vandermonde};
use nalgebra::DMatrix;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-length segments of a series, one per row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentBatch {
    data: DMatrix<f64>,
}

/// Fitted trends, one row per segment of the matching [`SegmentBatch`].
pub type TrendBatch = SegmentBatch;

impl SegmentBatch {
    /// Wrap a `segments x window` matrix.
    pub fn from_matrix(data: DMatrix<f64>) -> Self {
        Self { data }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    /// Whether the batch holds no segment.
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Samples per segment.
    pub fn window(&self) -> usize {
        self.data.ncols()
    }

    /// Underlying `segments x window` matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Segment `index` as an owned vector.
    pub fn segment(&self, index: usize) -> Vec<f64> {
        self.data.row(index).iter().copied().collect()
    }

    /// Element-wise difference, i.e. the detrended segments.
    pub fn detrended(&self, trends: &TrendBatch) -> DMatrix<f64> {
        &self.data - &trends.data
    }
}

/// Start offsets of the segments for a series of length `n`.
///
/// Overlapping windows start every `window / 2` samples strictly below
/// `n - window`; contiguous windows tile the longest prefix whose length is a
/// multiple of `window`.
pub fn window_offsets(n: usize, window: usize, overlap: bool) -> Vec<usize> {
    if window == 0 {
        return Vec::new();
    }
    if overlap {
        let stride = (window / 2).max(1);
        (0..n.saturating_sub(window)).step_by(stride).collect()
    } else {
        (0..n / window).map(|i| i * window).collect()
    }
}

/// Cut the working series into segments of `window` samples.
///
/// Trailing samples that do not fill a whole window are discarded.
pub fn get_windows(series: &[f64], window: usize, overlap: bool) -> SegmentBatch {
    let offsets = window_offsets(series.len(), window, overlap);
    SegmentBatch::from_matrix(DMatrix::from_fn(offsets.len(), window, |row, col| {
        series[offsets[row] + col]
    }))
}

/// Fit and evaluate a polynomial trend of the given order for every segment.
pub fn polynomial_trends(segments: &SegmentBatch, order: usize) -> DfaResult<TrendBatch> {
    let window = segments.window();
    if segments.is_empty() {
        return Ok(SegmentBatch::from_matrix(DMatrix::zeros(0, window)));
    }

    let x: Vec<f64> = (0..window).map(|i| i as f64).collect();
    let coefficients = polyfit_columns(&x, &segments.data.transpose(), order)?;
    let trends = vandermonde(&x, order) * coefficients;

    Ok(SegmentBatch::from_matrix(trends.transpose()))
}
