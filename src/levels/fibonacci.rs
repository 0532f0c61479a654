// =============================================================================
// Fibonacci retracement / extension levels
// =============================================================================
//
// Measured over the look-back window's high/low swing:
//   retracements at 23.6 / 38.2 / 50 / 61.8 / 78.6 % below the high,
//   one 161.8 % extension above the low.

use serde::{Deserialize, Serialize};

/// Fibonacci level set for one high/low swing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevels {
    pub level_236: f64,
    pub level_382: f64,
    pub level_500: f64,
    pub level_618: f64,
    pub level_786: f64,
    pub extension_1618: f64,
}

/// Compute retracement levels from the window's extreme high and low.
///
/// Empty input yields all zeros; a flat window (high == low) collapses every
/// level onto that price.
pub fn fibonacci_levels(highs: &[f64], lows: &[f64]) -> FibonacciLevels {
    let high = highs.iter().cloned().fold(f64::NAN, f64::max);
    let low = lows.iter().cloned().fold(f64::NAN, f64::min);
    if !high.is_finite() || !low.is_finite() {
        return FibonacciLevels {
            level_236: 0.0,
            level_382: 0.0,
            level_500: 0.0,
            level_618: 0.0,
            level_786: 0.0,
            extension_1618: 0.0,
        };
    }

    let range = high - low;
    FibonacciLevels {
        level_236: high - range * 0.236,
        level_382: high - range * 0.382,
        level_500: high - range * 0.500,
        level_618: high - range * 0.618,
        level_786: high - range * 0.786,
        extension_1618: low + range * 1.618,
    }
}
