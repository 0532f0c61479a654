// =============================================================================
// Stochastic Oscillator (%K / %D)
// =============================================================================
//
// %K locates the latest close inside the trailing high/low range:
//   %K = (close - lowest_low) / (highest_high - lowest_low) * 100
//
// %D is the 3-period SMA of a trailing %K series obtained by sliding the
// look-back window backwards one bar at a time.
//
// Thresholds: %K > 80 => overbought, %K < 20 => oversold.

use serde::{Deserialize, Serialize};

/// Number of trailing %K values averaged into %D.
const SMOOTH_PERIOD: usize = 3;

/// Stochastic oscillator snapshot at the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stochastic {
    pub k: f64,
    pub d: f64,
}

/// Compute %K / %D over the trailing `period` bars.
///
/// # Edge cases
/// - Empty input => both 50.0 (neutral).
/// - Shorter than `period` => the window clamps to whatever is available.
/// - Flat range (`highest_high == lowest_low`) => %K = 50.0.
pub fn stochastic(closes: &[f64], highs: &[f64], lows: &[f64], period: usize) -> Stochastic {
    let n = closes.len().min(highs.len()).min(lows.len());
    if n == 0 {
        return Stochastic { k: 50.0, d: 50.0 };
    }

    let k = percent_k(closes, highs, lows, n, period);

    // %D: average the %K values of the last SMOOTH_PERIOD window positions.
    let mut trailing = Vec::with_capacity(SMOOTH_PERIOD);
    for back in 0..SMOOTH_PERIOD.min(n) {
        trailing.push(percent_k(closes, highs, lows, n - back, period));
    }
    let d = trailing.iter().sum::<f64>() / trailing.len() as f64;

    Stochastic { k, d }
}

/// %K for the window ending at `end` (exclusive), clamped to available data.
fn percent_k(closes: &[f64], highs: &[f64], lows: &[f64], end: usize, period: usize) -> f64 {
    let span = period.max(1).min(end);
    let start = end - span;

    let highest = highs[start..end].iter().cloned().fold(f64::MIN, f64::max);
    let lowest = lows[start..end].iter().cloned().fold(f64::MAX, f64::min);
    let range = highest - lowest;
    if range <= 0.0 {
        return 50.0;
    }

    ((closes[end - 1] - lowest) / range * 100.0).clamp(0.0, 100.0)
}
