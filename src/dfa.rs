//! (Multifractal) Detrended Fluctuation Analysis.
//!
//! Detrended fluctuation analysis finds long-term statistical dependencies in a
//! time series. For monofractal DFA the result is the slope α of the log-log
//! line between window sizes and fluctuations. For multifractal DFA the slopes
//! under different q are generalized Hurst exponents h(q), from which the
//! singularity spectrum is derived.
//!
//! # Algorithm
//!
//! 1. Select the scales and sanitize the fractal exponents.
//! 2. Optionally replace the signal by its profile (mean-centred cumulative sum).
//! 3. For every scale: cut the series into windows, remove a per-window
//!    polynomial trend and compute one fluctuation value per exponent.
//! 4. Regress `log2(F_q(s))` on `log2(s)` for every exponent.
//! 5. (Multifractal) derive τ(q), H(q), D(q) and their summary statistics.
//!
//! # References
//!
//! - Ihlen, E. A. F. E. (2012). Introduction to multifractal detrended fluctuation
//!   analysis in Matlab. Frontiers in Physiology, 3, 141.
//! - Kantelhardt, J. W. et al. (2002). Multifractal detrended fluctuation analysis
//!   of nonstationary time series. Physica A, 316(1-4), 87-114.
//! - Hardstone, R. et al. (2012). Detrended fluctuation analysis: a scale-free view
//!   on neuronal oscillations. Frontiers in Physiology, 3, 450.

use crate::config::DfaConfig;
use crate::errors::DfaResult;
use crate::exponents::sanitize_q;
use crate::fluctuation::{FluctuationMatrix, FluctuationStrategy};
use crate::math_utils::integrate_series;
use crate::regression::{fit_scaling, ScalingFit, Slopes};
use crate::report::{DiagnosticReport, DiagnosticSink};
use crate::scales::find_scales;
use crate::segments::{get_windows, polynomial_trends};
use crate::signal::AsSignal;
use crate::singularity::{singularity_spectrum, SingularitySpectrum, SpectrumSummary};
use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Parameters and intermediate results of an analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DfaInfo {
    /// Window sizes that were analysed
    pub scale: Vec<usize>,
    /// Fractal exponents after sanitizing
    pub q: Vec<f64>,
    /// Fluctuation values, scales x exponents
    pub fluctuations: Option<FluctuationMatrix>,
    /// Log-log fit (slope and intercept) per exponent
    pub fits: Option<Vec<ScalingFit>>,
    /// Slopes of the log-log fits
    pub alpha: Option<Slopes>,
    /// Singularity spectrum (multifractal only)
    pub spectrum: Option<SingularitySpectrum>,
}

impl DfaInfo {
    fn new(scale: Vec<usize>, q: Vec<f64>) -> Self {
        Self {
            scale,
            q,
            fluctuations: None,
            fits: None,
            alpha: None,
            spectrum: None,
        }
    }
}

/// Primary result of an analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DfaOutput {
    /// Monofractal DFA: α, or one slope per exponent
    Alpha(Slopes),
    /// Multifractal DFA: singularity spectrum features
    Spectrum(SpectrumSummary),
    /// No scale produced a fluctuation value
    Undefined,
}

impl DfaOutput {
    /// Scalar α, or NaN if the output is not a single slope.
    pub fn alpha(&self) -> f64 {
        match self {
            DfaOutput::Alpha(slopes) => slopes.scalar().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    /// Slopes of a monofractal analysis.
    pub fn slopes(&self) -> Option<&Slopes> {
        match self {
            DfaOutput::Alpha(slopes) => Some(slopes),
            _ => None,
        }
    }

    /// Spectrum features of a multifractal analysis.
    pub fn summary(&self) -> Option<&SpectrumSummary> {
        match self {
            DfaOutput::Spectrum(summary) => Some(summary),
            _ => None,
        }
    }

    /// Whether the analysis degenerated to an undefined result.
    pub fn is_undefined(&self) -> bool {
        matches!(self, DfaOutput::Undefined)
    }
}

/// Output plus diagnostic information of one analysis call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DfaAnalysis {
    /// Primary result
    pub output: DfaOutput,
    /// Parameters and intermediate results
    pub info: DfaInfo,
}

/// Run (multifractal) detrended fluctuation analysis on one series.
///
/// # Errors
/// * [`crate::DfaError::Dimensionality`] for matrix-shaped input
/// * [`crate::DfaError::InvalidScale`] for an invalid scale set
/// * [`crate::DfaError::NonFiniteExponent`] / [`crate::DfaError::EmptyExponentSet`]
///   for unusable exponents
///
/// # Example
/// ```rust
/// use fractal_dfa::{fractal_dfa, DfaConfig};
/// use fractal_dfa::generators::{generate_benchmark_series, BenchmarkSeriesType, GeneratorConfig};
///
/// let config = GeneratorConfig { length: 2000, seed: Some(7) };
/// let noise = generate_benchmark_series(BenchmarkSeriesType::WhiteNoise, &config).unwrap();
///
/// let analysis = fractal_dfa(&noise, &DfaConfig::default()).unwrap();
/// let alpha = analysis.output.alpha();
/// assert!(alpha > 0.3 && alpha < 0.7);
/// ```
pub fn fractal_dfa<S: AsSignal + ?Sized>(signal: &S, config: &DfaConfig) -> DfaResult<DfaAnalysis> {
    let signal = signal.as_signal()?;
    let n = signal.len();

    let scale = find_scales(n, &config.scale)?;
    let q = sanitize_q(&config.q, config.multifractal)?;
    let info = DfaInfo::new(scale, q);

    let series: Cow<'_, [f64]> = if config.integrate {
        Cow::Owned(integrate_series(&signal))
    } else {
        signal
    };

    let strategy = FluctuationStrategy::from_multifractal(config.multifractal);
    let rows = fluctuation_rows(&series, &info.scale, &info.q, config.overlap, config.order, strategy)?;

    finish_analysis(info, &rows, config.multifractal)
}

/// Regression and spectrum stages over the per-scale fluctuation rows.
fn finish_analysis(mut info: DfaInfo, rows: &[Vec<f64>], multifractal: bool) -> DfaResult<DfaAnalysis> {
    // Validated scales always yield at least one segment; this guard keeps the
    // degenerate case a NaN result rather than an error.
    if rows.is_empty() {
        warn!("No scale produced a fluctuation value; result is undefined");
        return Ok(DfaAnalysis {
            output: DfaOutput::Undefined,
            info,
        });
    }

    let fluctuations = FluctuationMatrix::from_rows(rows, info.q.len());
    let fits = fit_scaling(&info.scale, &fluctuations, &info.q)?;
    let slopes = Slopes::from_vec(fits.iter().map(|fit| fit.slope).collect());
    info.fluctuations = Some(fluctuations);
    info.fits = Some(fits);

    let output = if multifractal {
        let spectrum = singularity_spectrum(&info.q, slopes.as_slice());
        let summary = spectrum.summary;
        info.spectrum = Some(spectrum);
        DfaOutput::Spectrum(summary)
    } else {
        DfaOutput::Alpha(slopes.clone())
    };
    info.alpha = Some(slopes);

    Ok(DfaAnalysis { output, info })
}

/// Multifractal detrended fluctuation analysis (MFDFA).
///
/// Same as [`fractal_dfa`] with the multifractal branch forced on.
pub fn fractal_mfdfa<S: AsSignal + ?Sized>(signal: &S, config: &DfaConfig) -> DfaResult<DfaAnalysis> {
    let config = config.clone().with_multifractal(true);
    fractal_dfa(signal, &config)
}

/// Run the analysis and hand its diagnostic report to a rendering sink.
pub fn fractal_dfa_with_sink<S, K>(
    signal: &S,
    config: &DfaConfig,
    sink: &mut K,
) -> DfaResult<DfaAnalysis>
where
    S: AsSignal + ?Sized,
    K: DiagnosticSink + ?Sized,
{
    let analysis = fractal_dfa(signal, config)?;
    if let Some(report) = DiagnosticReport::from_analysis(&analysis) {
        sink.render(&report);
    }
    Ok(analysis)
}

/// One fluctuation row per scale, in scale order.
fn fluctuation_rows(
    series: &[f64],
    scales: &[usize],
    q: &[f64],
    overlap: bool,
    order: usize,
    strategy: FluctuationStrategy,
) -> DfaResult<Vec<Vec<f64>>> {
    let row = |window: usize| -> DfaResult<Vec<f64>> {
        let segments = get_windows(series, window, overlap);
        let trends = polynomial_trends(&segments, order)?;
        let fluctuation = strategy.fluctuation(&segments, &trends, q);
        debug!(
            "Scale {}: {} segments, fluctuation {:?}",
            window,
            segments.len(),
            fluctuation
        );
        if fluctuation.iter().any(|f| !f.is_finite()) {
            warn!("Non-finite fluctuation at scale {}: {:?}", window, fluctuation);
        }
        Ok(fluctuation)
    };

    #[cfg(feature = "parallel")]
    let rows = {
        use rayon::prelude::*;
        scales.par_iter().map(|&window| row(window)).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let rows = scales.iter().map(|&window| row(window)).collect();

    rows
}
