// =============================================================================
// meridian-quant: quantitative technical-analysis engine
// =============================================================================

//! Deterministic technical analysis over OHLCV candle series.
//!
//! Feed [`analyze`] a validated slice of [`OhlcvBar`]s and an
//! [`AnalysisConfig`] and it returns a single [`AnalysisResult`] covering
//! trend statistics, the classic indicator set (SMA/EMA/MACD, RSI,
//! stochastic, ATR, ROC, Bollinger, pivots), lightweight predictive models
//! (KNN pattern matching, seeded Monte Carlo, Holt-Winters smoothing,
//! candlestick patterns), clustered support/resistance with trade targets,
//! and an equal-weight consensus signal.
//!
//! The engine is pure: no I/O, no shared state, and with a fixed Monte
//! Carlo seed the same input always produces the same output. Short but
//! well-formed series never error; each component degrades to a documented
//! neutral default instead.
//!
//! ```no_run
//! use meridian_quant::{analyze, AnalysisConfig, OhlcvBar};
//!
//! let bars: Vec<OhlcvBar> = load_candles();
//! let result = analyze(&bars, &AnalysisConfig::default())?;
//! println!(
//!     "{} (score {:.2})",
//!     result.ml_predictions.consensus_signal, result.ml_predictions.consensus_score
//! );
//! # fn load_candles() -> Vec<OhlcvBar> { Vec::new() }
//! # Ok::<(), meridian_quant::AnalysisError>(())
//! ```

pub mod bars;
pub mod config;
pub mod consensus;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod levels;
pub mod models;
pub mod stats;
pub mod types;

pub use bars::OhlcvBar;
pub use config::{AnalysisConfig, KnnConfig, MonteCarloConfig, SmoothingConfig};
pub use consensus::{consensus, Consensus, ConsensusInputs};
pub use engine::{analyze, AnalysisResult};
pub use error::AnalysisError;
pub use types::{OscillatorSignal, Signal, TrendDirection, VolatilityLevel};
