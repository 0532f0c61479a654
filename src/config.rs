// =============================================================================
// Analysis configuration: tunable model parameters with documented defaults
// =============================================================================
//
// Every empirically tuned constant lives here so that the same engine can be
// exercised at multiple parameter settings without code edits. All fields
// carry `#[serde(default)]` so that loading an older serialized config never
// breaks when new knobs are added.

use serde::{Deserialize, Serialize};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_oscillator_period() -> usize {
    14
}

fn default_bollinger_period() -> usize {
    20
}

fn default_bollinger_mult() -> f64 {
    2.0
}

fn default_knn_neighbors() -> usize {
    5
}

fn default_knn_feature_window() -> usize {
    10
}

fn default_knn_confidence_scale() -> f64 {
    5.0
}

fn default_mc_paths() -> usize {
    1000
}

fn default_mc_horizon() -> usize {
    30
}

fn default_hw_alpha() -> f64 {
    0.3
}

fn default_hw_beta() -> f64 {
    0.1
}

fn default_hw_horizon() -> usize {
    5
}

// =============================================================================
// Model sub-configs
// =============================================================================

/// Parameters for the k-nearest-neighbors next-move predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnConfig {
    /// Number of nearest historical windows to average (K).
    #[serde(default = "default_knn_neighbors")]
    pub neighbors: usize,

    /// Number of trailing daily %-changes forming the feature vector.
    #[serde(default = "default_knn_feature_window")]
    pub feature_window: usize,

    /// Scale applied to the neighbor-dispersion penalty when deriving
    /// confidence: `confidence = 100 - stddev * scale`. Empirically tuned;
    /// treat as a knob, not a law.
    #[serde(default = "default_knn_confidence_scale")]
    pub confidence_scale: f64,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self {
            neighbors: default_knn_neighbors(),
            feature_window: default_knn_feature_window(),
            confidence_scale: default_knn_confidence_scale(),
        }
    }
}

/// Parameters for the Monte Carlo price-path simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of simulated geometric paths. More paths tighten the
    /// percentile estimates at linear cost.
    #[serde(default = "default_mc_paths")]
    pub paths: usize,

    /// Simulation horizon in bars.
    #[serde(default = "default_mc_horizon")]
    pub horizon: usize,

    /// Fixed RNG seed for reproducible runs. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            paths: default_mc_paths(),
            horizon: default_mc_horizon(),
            seed: None,
        }
    }
}

/// Parameters for Holt-Winters double exponential smoothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Level smoothing factor (alpha), in (0, 1].
    #[serde(default = "default_hw_alpha")]
    pub alpha: f64,

    /// Trend smoothing factor (beta), in (0, 1].
    #[serde(default = "default_hw_beta")]
    pub beta: f64,

    /// Forecast horizon in bars.
    #[serde(default = "default_hw_horizon")]
    pub horizon: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            alpha: default_hw_alpha(),
            beta: default_hw_beta(),
            horizon: default_hw_horizon(),
        }
    }
}

// =============================================================================
// AnalysisConfig
// =============================================================================

/// Top-level engine configuration.
///
/// The [`Default`] impl mirrors the documented defaults exactly; a default
/// config reproduces the standard indicator settings (RSI-14, Bollinger
/// 20/2.0, 1000 Monte Carlo paths, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Look-back period for RSI.
    #[serde(default = "default_oscillator_period")]
    pub rsi_period: usize,

    /// Look-back period for the stochastic oscillator.
    #[serde(default = "default_oscillator_period")]
    pub stochastic_period: usize,

    /// Look-back period for ATR.
    #[serde(default = "default_oscillator_period")]
    pub atr_period: usize,

    /// Look-back period for Bollinger bands (also the daily-volatility SMA).
    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    /// Standard-deviation multiplier for the Bollinger envelope.
    #[serde(default = "default_bollinger_mult")]
    pub bollinger_mult: f64,

    /// KNN predictor parameters.
    #[serde(default)]
    pub knn: KnnConfig,

    /// Monte Carlo simulator parameters.
    #[serde(default)]
    pub monte_carlo: MonteCarloConfig,

    /// Holt-Winters smoothing parameters.
    #[serde(default)]
    pub smoothing: SmoothingConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rsi_period: default_oscillator_period(),
            stochastic_period: default_oscillator_period(),
            atr_period: default_oscillator_period(),
            bollinger_period: default_bollinger_period(),
            bollinger_mult: default_bollinger_mult(),
            knn: KnnConfig::default(),
            monte_carlo: MonteCarloConfig::default(),
            smoothing: SmoothingConfig::default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_match_documentation() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.rsi_period, 14);
        assert_eq!(cfg.stochastic_period, 14);
        assert_eq!(cfg.atr_period, 14);
        assert_eq!(cfg.bollinger_period, 20);
        assert!((cfg.bollinger_mult - 2.0).abs() < 1e-12);
        assert_eq!(cfg.knn.neighbors, 5);
        assert_eq!(cfg.knn.feature_window, 10);
        assert_eq!(cfg.monte_carlo.paths, 1000);
        assert_eq!(cfg.monte_carlo.horizon, 30);
        assert!(cfg.monte_carlo.seed.is_none());
        assert!((cfg.smoothing.alpha - 0.3).abs() < 1e-12);
        assert!((cfg.smoothing.beta - 0.1).abs() < 1e-12);
    }

    #[test]
    fn empty_json_deserializes_to_defaults() {
        let cfg: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.rsi_period, 14);
        assert_eq!(cfg.monte_carlo.paths, 1000);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let cfg: AnalysisConfig =
            serde_json::from_str(r#"{"rsi_period": 7, "monte_carlo": {"seed": 42}}"#).unwrap();
        assert_eq!(cfg.rsi_period, 7);
        assert_eq!(cfg.monte_carlo.seed, Some(42));
        // Untouched knobs keep their defaults.
        assert_eq!(cfg.monte_carlo.paths, 1000);
        assert_eq!(cfg.bollinger_period, 20);
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = AnalysisConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rsi_period, cfg.rsi_period);
        assert_eq!(back.knn.neighbors, cfg.knn.neighbors);
    }
}
