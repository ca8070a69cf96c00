//! # Fractal DFA
//!
//! (Multifractal) Detrended Fluctuation Analysis of one-dimensional time series.
//!
//! Detrended fluctuation analysis (DFA) measures long-term statistical
//! dependencies. The series is integrated, cut into windows of several sizes,
//! detrended per window and the fluctuation around the trend is regressed
//! against the window size on a log-log scale.
//!
//! ## Key Features
//!
//! - **Monofractal DFA**: the scaling exponent α (α ≈ 0.5 for white noise)
//! - **Multifractal DFA**: generalized Hurst exponents h(q) for many exponents q
//! - **Singularity Spectrum**: τ(q), H(q), D(q) and their summary features
//! - **Flexible Windows**: overlapping or contiguous windows, any detrending order
//! - **Diagnostics**: fitted log-log lines and spectrum points for plotting
//!
//! ## Quick Start
//!
//! ```rust
//! use fractal_dfa::{fractal_dfa, fractal_mfdfa, DfaConfig};
//! use fractal_dfa::generators::{generate_benchmark_series, BenchmarkSeriesType, GeneratorConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeneratorConfig { length: 2000, seed: Some(42) };
//!     let noise = generate_benchmark_series(BenchmarkSeriesType::WhiteNoise, &config)?;
//!
//!     // Monofractal DFA
//!     let analysis = fractal_dfa(&noise, &DfaConfig::default())?;
//!     println!("alpha = {:.3}", analysis.output.alpha());
//!     println!("scales: {:?}", analysis.info.scale);
//!
//!     // Multifractal DFA with the default exponents
//!     let analysis = fractal_mfdfa(&noise, &DfaConfig::default())?;
//!     if let Some(summary) = analysis.output.summary() {
//!         for (name, value) in summary.to_row() {
//!             println!("{name}: {value:.3}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! [`fractal_dfa`] drives the pipeline: [`scales`] picks window sizes,
//! [`exponents`] sanitizes q, [`segments`] cuts and detrends windows,
//! [`fluctuation`] computes F(s), [`regression`] fits the log-log lines and
//! [`singularity`] derives the spectrum. Each stage can be used on its own.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dfa;
pub mod errors;
pub mod exponents;
pub mod fluctuation;
pub mod generators;
pub mod math_utils;
pub mod regression;
pub mod report;
pub mod scales;
pub mod segments;
pub mod signal;
pub mod singularity;

// Main public API
pub use config::{DfaConfig, ExponentSpec, ScaleSpec};
pub use dfa::{fractal_dfa, fractal_dfa_with_sink, fractal_mfdfa, DfaAnalysis, DfaInfo, DfaOutput};
pub use errors::{DfaError, DfaResult, ScaleViolation};
pub use signal::AsSignal;

// Pipeline stages
pub use exponents::sanitize_q;
pub use fluctuation::{FluctuationMatrix, FluctuationStrategy};
pub use regression::{fit_scaling, ScalingFit, Slopes};
pub use scales::find_scales;
pub use segments::{get_windows, polynomial_trends, SegmentBatch, TrendBatch};
pub use singularity::{singularity_spectrum, SingularitySpectrum, SpectrumSummary};

// Diagnostics
pub use report::{CollectingSink, DiagnosticReport, DiagnosticSink, FitLine, LogSink, SpectrumPoint};

// Utilities
pub use math_utils::{expspace, integrate_series};
