// =============================================================================
// Dynamic support / resistance from clustered swing points
// =============================================================================
//
// Local extrema (a high above its neighbors on both sides, or a low below
// them) are collected as swing points, then clustered by price proximity.
// The densest cluster on each side of the current price becomes the strong
// band; the runner-up is the weak band. Confidence reflects how much of the
// swing population the chosen clusters capture.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bars::OhlcvBar;

/// Bars on each side a swing point must dominate.
const SWING_NEIGHBORS: usize = 2;

/// Relative price tolerance for grouping swing points into one cluster.
const CLUSTER_TOLERANCE: f64 = 0.005;

/// Confidence reported when no swing structure exists at all.
const FALLBACK_CONFIDENCE: f64 = 30.0;

/// Clustered support/resistance bands around the current price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicLevels {
    pub strong_support: f64,
    pub weak_support: f64,
    pub strong_resistance: f64,
    pub weak_resistance: f64,
    /// Cluster-density confidence in `[0, 100]`.
    pub confidence: f64,
}

/// Derive support/resistance bands from the swing structure of `bars`.
///
/// When a side has no swing cluster (young or one-directional markets) it
/// falls back to the window extreme on that side, with reduced confidence.
pub fn dynamic_levels(bars: &[OhlcvBar]) -> DynamicLevels {
    let current = bars.last().map(|b| b.close).unwrap_or(0.0);
    if bars.is_empty() {
        return DynamicLevels {
            strong_support: 0.0,
            weak_support: 0.0,
            strong_resistance: 0.0,
            weak_resistance: 0.0,
            confidence: 0.0,
        };
    }

    let swing_highs = swing_points(bars, true);
    let swing_lows = swing_points(bars, false);
    let total_swings = swing_highs.len() + swing_lows.len();

    let resistance_clusters = cluster(
        swing_highs.iter().copied().filter(|&p| p > current).collect(),
        current,
    );
    let support_clusters = cluster(
        swing_lows.iter().copied().filter(|&p| p < current).collect(),
        current,
    );

    let window_high = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let window_low = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);

    let (strong_resistance, weak_resistance) =
        pick_bands(&resistance_clusters, window_high.max(current));
    let (strong_support, weak_support) = pick_bands(&support_clusters, window_low.min(current));

    let captured = resistance_clusters.first().map(|c| c.members).unwrap_or(0)
        + support_clusters.first().map(|c| c.members).unwrap_or(0);

    let confidence = if total_swings == 0 {
        FALLBACK_CONFIDENCE
    } else {
        (captured as f64 / total_swings as f64 * 100.0).clamp(0.0, 100.0)
    };

    debug!(
        swings = total_swings,
        support_clusters = support_clusters.len(),
        resistance_clusters = resistance_clusters.len(),
        confidence = format!("{confidence:.1}"),
        "Dynamic levels computed"
    );

    DynamicLevels {
        strong_support,
        weak_support,
        strong_resistance,
        weak_resistance,
        confidence,
    }
}

/// Rolling-window local extrema of highs (`maxima = true`) or lows.
fn swing_points(bars: &[OhlcvBar], maxima: bool) -> Vec<f64> {
    let n = bars.len();
    if n < 2 * SWING_NEIGHBORS + 1 {
        return Vec::new();
    }

    let mut points = Vec::new();
    for i in SWING_NEIGHBORS..n - SWING_NEIGHBORS {
        let value = if maxima { bars[i].high } else { bars[i].low };
        let dominates = (i - SWING_NEIGHBORS..=i + SWING_NEIGHBORS)
            .filter(|&j| j != i)
            .all(|j| {
                let neighbor = if maxima { bars[j].high } else { bars[j].low };
                if maxima {
                    value >= neighbor
                } else {
                    value <= neighbor
                }
            });
        if dominates {
            points.push(value);
        }
    }
    points
}

#[derive(Debug, Clone, Copy)]
struct Cluster {
    center: f64,
    members: usize,
}

/// Group sorted prices into proximity clusters, densest first.
fn cluster(mut prices: Vec<f64>, reference: f64) -> Vec<Cluster> {
    if prices.is_empty() {
        return Vec::new();
    }
    prices.sort_by(f64::total_cmp);

    let tolerance = reference.abs().max(f64::EPSILON) * CLUSTER_TOLERANCE;
    let mut clusters: Vec<Cluster> = Vec::new();
    let mut start = 0;
    for i in 1..=prices.len() {
        let split = i == prices.len() || prices[i] - prices[i - 1] > tolerance;
        if split {
            let group = &prices[start..i];
            clusters.push(Cluster {
                center: group.iter().sum::<f64>() / group.len() as f64,
                members: group.len(),
            });
            start = i;
        }
    }

    clusters.sort_by(|a, b| b.members.cmp(&a.members));
    clusters
}

/// Strong band = densest cluster; weak = runner-up (falling back to the
/// window extreme when clusters run out).
fn pick_bands(clusters: &[Cluster], fallback: f64) -> (f64, f64) {
    let strong = clusters.first().map(|c| c.center).unwrap_or(fallback);
    let weak = clusters.get(1).map(|c| c.center).unwrap_or(fallback);
    (strong, weak)
}
