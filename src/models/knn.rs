// =============================================================================
// K-Nearest-Neighbors next-move predictor
// =============================================================================
//
// Treats the last `feature_window` daily percentage changes as a feature
// vector and scans history for the K most similar windows by Euclidean
// distance. The prediction is the inverse-distance-weighted average of each
// neighbor's subsequent move; confidence shrinks with the dispersion of the
// neighbors' outcomes:
//
//   confidence = 100 - stddev(neighbor moves) * confidence_scale   (clamped)
//
// The dispersion scale is an empirically tuned knob (see `KnnConfig`).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::KnnConfig;
use crate::stats::std_dev;

/// Tie-break epsilon for inverse-distance weights: an exact historical match
/// would otherwise produce an infinite weight.
const DISTANCE_EPSILON: f64 = 1e-9;

/// KNN prediction for the next bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnnForecast {
    /// Predicted next-bar move in percent.
    pub predicted_move_pct: f64,
    /// Confidence in `[0, 100]`, derived from neighbor dispersion.
    pub confidence: f64,
}

impl KnnForecast {
    fn neutral() -> Self {
        Self {
            predicted_move_pct: 0.0,
            confidence: 0.0,
        }
    }
}

/// Predict the next percentage move from the K most similar historical
/// windows.
///
/// Needs enough closes for the target window plus at least one candidate
/// window with a known outcome; anything less returns the neutral forecast
/// (0% move, 0 confidence).
pub fn knn_forecast(closes: &[f64], config: &KnnConfig) -> KnnForecast {
    let window = config.feature_window;
    if window == 0 || config.neighbors == 0 {
        return KnnForecast::neutral();
    }

    let changes = pct_changes(closes);
    // Target window occupies the last `window` changes; a candidate needs a
    // full window plus its outcome, strictly before the target.
    if changes.len() < window + 2 {
        return KnnForecast::neutral();
    }

    let target = &changes[changes.len() - window..];

    let mut scored: Vec<(f64, f64)> = Vec::new(); // (distance, outcome)
    for start in 0..changes.len() - window - 1 {
        let candidate = &changes[start..start + window];
        let outcome = changes[start + window];
        let distance = euclidean(target, candidate);
        scored.push((distance, outcome));
    }

    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.truncate(config.neighbors);

    let mut weight_sum = 0.0;
    let mut weighted_move = 0.0;
    for &(distance, outcome) in &scored {
        let weight = 1.0 / (distance + DISTANCE_EPSILON);
        weight_sum += weight;
        weighted_move += weight * outcome;
    }
    if weight_sum == 0.0 {
        return KnnForecast::neutral();
    }
    let predicted_move_pct = weighted_move / weight_sum;

    let outcomes: Vec<f64> = scored.iter().map(|&(_, o)| o).collect();
    let dispersion = std_dev(&outcomes);
    let confidence = (100.0 - dispersion * config.confidence_scale).clamp(0.0, 100.0);

    debug!(
        neighbors = scored.len(),
        predicted_move_pct = format!("{predicted_move_pct:.4}"),
        dispersion = format!("{dispersion:.4}"),
        confidence = format!("{confidence:.1}"),
        "KNN forecast"
    );

    KnnForecast {
        predicted_move_pct,
        confidence,
    }
}

/// Daily percentage changes, skipping zero-price bases.
fn pct_changes(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0] * 100.0)
        .collect()
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
