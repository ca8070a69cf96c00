//! Diagnostic reports of an analysis.
//!
//! A [`DiagnosticReport`] carries the data a log-log fluctuation plot and a
//! singularity spectrum plot would show. Rendering is left to a
//! [`DiagnosticSink`]; [`LogSink`] writes the report through the `log` facade.

use crate::dfa::DfaAnalysis;
use crate::fluctuation::FluctuationMatrix;
use crate::regression::ScalingFit;
use log::{info, Level};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fitted scaling line of one exponent, evaluated at every scale.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FitLine {
    /// Fractal exponent
    pub q: f64,
    /// Log-log fit
    pub fit: ScalingFit,
    /// `2^(slope * log2(s) + intercept)` per scale
    pub predicted: Vec<f64>,
}

/// One point (H(q), D(q)) of the singularity spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpectrumPoint {
    /// Fractal exponent
    pub q: f64,
    /// Singularity strength
    pub strength: f64,
    /// Singularity dimension
    pub dimension: f64,
}

/// Everything needed to draw the diagnostic plots of an analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiagnosticReport {
    /// Window sizes
    pub scales: Vec<usize>,
    /// Fractal exponents
    pub q: Vec<f64>,
    /// Observed fluctuations, scales x exponents
    pub fluctuations: FluctuationMatrix,
    /// One fitted line per exponent
    pub fit_lines: Vec<FitLine>,
    /// Spectrum points (multifractal only)
    pub spectrum: Option<Vec<SpectrumPoint>>,
    /// Singularity strength at the peak dimension (multifractal only)
    pub h_max: Option<f64>,
}

impl DiagnosticReport {
    /// Build the report of a finished analysis.
    ///
    /// Returns `None` when the analysis produced no fluctuations.
    pub fn from_analysis(analysis: &DfaAnalysis) -> Option<Self> {
        let info = &analysis.info;
        let fluctuations = info.fluctuations.clone()?;

        let fit_lines = info
            .fits
            .as_ref()?
            .iter()
            .copied()
            .zip(&info.q)
            .map(|(fit, &q)| FitLine {
                q,
                fit,
                predicted: info.scale.iter().map(|&s| fit.predict(s)).collect(),
            })
            .collect();

        let spectrum = info.spectrum.as_ref().map(|spectrum| {
            info.q
                .iter()
                .zip(&spectrum.singularity_strength)
                .zip(&spectrum.singularity_dimension)
                .map(|((&q, &strength), &dimension)| SpectrumPoint {
                    q,
                    strength,
                    dimension,
                })
                .collect()
        });

        Some(Self {
            scales: info.scale.clone(),
            q: info.q.clone(),
            fluctuations,
            fit_lines,
            spectrum,
            h_max: info.spectrum.as_ref().map(|s| s.summary.h_max),
        })
    }
}

/// Receiver of diagnostic reports.
pub trait DiagnosticSink {
    /// Render one report.
    fn render(&mut self, report: &DiagnosticReport);
}

/// Renders reports as `info`-level log records.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn render(&mut self, report: &DiagnosticReport) {
        if !log::log_enabled!(Level::Info) {
            return;
        }
        for (column, line) in report.fit_lines.iter().enumerate() {
            info!(
                "q = {}: h = {:.4}, intercept = {:.4}",
                line.q, line.fit.slope, line.fit.intercept
            );
            for (row, (&scale, &predicted)) in report.scales.iter().zip(&line.predicted).enumerate() {
                info!(
                    "  s = {:>6}  F = {:.6e}  fit = {:.6e}",
                    scale,
                    report.fluctuations.get(row, column),
                    predicted
                );
            }
        }
        if let Some(points) = &report.spectrum {
            for point in points {
                info!(
                    "q = {}: H = {:.4}, D = {:.4}",
                    point.q, point.strength, point.dimension
                );
            }
        }
        if let Some(h_max) = report.h_max {
            info!("HMax = {:.4}", h_max);
        }
    }
}

/// Collects every rendered report; useful for tests and for callers that
/// draw plots themselves.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    /// Reports in render order
    pub reports: Vec<DiagnosticReport>,
}

impl DiagnosticSink for CollectingSink {
    fn render(&mut self, report: &DiagnosticReport) {
        self.reports.push(report.clone());
    }
}
