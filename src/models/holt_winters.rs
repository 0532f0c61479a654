// =============================================================================
// Holt-Winters double exponential smoothing
// =============================================================================
//
// Tracks a level and a trend component per bar:
//
//   level_t = α * price_t + (1 - α) * (level_{t-1} + trend_{t-1})
//   trend_t = β * (level_t - level_{t-1}) + (1 - β) * trend_{t-1}
//
// and forecasts `level + horizon * trend`. α/β default to 0.3/0.1 but are
// plain config knobs; the same engine runs at any smoothing setting.

use tracing::debug;

use crate::config::SmoothingConfig;

/// Forecast the price `config.horizon` bars ahead.
///
/// Fewer than two closes leaves nothing to smooth: returns the latest close
/// (or 0.0 for empty input).
pub fn forecast(closes: &[f64], config: &SmoothingConfig) -> f64 {
    if closes.len() < 2 {
        return closes.last().copied().unwrap_or(0.0);
    }

    let alpha = config.alpha.clamp(0.0, 1.0);
    let beta = config.beta.clamp(0.0, 1.0);

    let mut level = closes[0];
    let mut trend = closes[1] - closes[0];

    for &price in &closes[1..] {
        let prev_level = level;
        level = alpha * price + (1.0 - alpha) * (level + trend);
        trend = beta * (level - prev_level) + (1.0 - beta) * trend;
    }

    let value = level + config.horizon as f64 * trend;
    debug!(
        level = format!("{level:.4}"),
        trend = format!("{trend:.4}"),
        horizon = config.horizon,
        forecast = format!("{value:.4}"),
        "Holt-Winters forecast"
    );
    value
}
