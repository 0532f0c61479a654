// =============================================================================
// Exponential Moving Average (EMA) and MACD
// =============================================================================
//
// EMA weights recent prices more heavily than the SMA:
//   k     = 2 / (period + 1)
//   EMA_t = (close_t - EMA_{t-1}) * k + EMA_{t-1}
//
// The first EMA value is seeded with the SMA of the first `period` closes.
//
// MACD is built on top of the EMA series:
//   macd line  = EMA(12) - EMA(26)
//   signal     = EMA(9) of the macd-line series
//   histogram  = macd - signal

use serde::{Deserialize, Serialize};

/// Standard MACD periods (fast, slow, signal).
const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;

/// Compute the full EMA series for `prices` and `period`.
///
/// The returned vector has one value per close starting at index
/// `period - 1` (the seed SMA). Returns an empty vec when `period == 0` or
/// the input is shorter than `period`.
pub fn ema_series(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period + 1) as f64;
    let seed: f64 = prices[..period].iter().sum::<f64>() / period as f64;

    let mut result = Vec::with_capacity(prices.len() - period + 1);
    result.push(seed);

    let mut prev = seed;
    for &price in &prices[period..] {
        let ema = (price - prev) * k + prev;
        result.push(ema);
        prev = ema;
    }

    result
}

/// Most recent EMA value.
///
/// Same insufficient-data fallback as [`crate::indicators::sma::sma`]: fewer
/// than `period` prices yields the latest price; empty input yields 0.0.
pub fn ema(prices: &[f64], period: usize) -> f64 {
    match ema_series(prices, period).last() {
        Some(&value) => value,
        None => prices.last().copied().unwrap_or(0.0),
    }
}

/// MACD snapshot: line, signal and histogram at the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub macd_line: f64,
    pub signal_line: f64,
    pub histogram: f64,
}

/// Compute MACD(12, 26, 9) for the given closes.
///
/// With fewer than 26 closes the slow EMA falls back to the latest price per
/// [`ema`] (below 12 closes the fast one does too), so the macd line is
/// `ema(12) - last_close` (0 once both collapse), the signal tracks the line
/// and the histogram is 0. Never NaN.
pub fn macd(prices: &[f64]) -> Macd {
    let fast = ema_series(prices, MACD_FAST);
    let slow = ema_series(prices, MACD_SLOW);

    if slow.is_empty() {
        // Short series: both EMAs fall back to the last close.
        let fallback_fast = ema(prices, MACD_FAST);
        let fallback_slow = ema(prices, MACD_SLOW);
        let line = fallback_fast - fallback_slow;
        return Macd {
            macd_line: line,
            signal_line: line,
            histogram: 0.0,
        };
    }

    // The slow series starts (MACD_SLOW - MACD_FAST) points after the fast
    // one; align their tails to difference matching bars.
    let offset = fast.len() - slow.len();
    let macd_line_series: Vec<f64> = slow
        .iter()
        .enumerate()
        .map(|(i, &s)| fast[i + offset] - s)
        .collect();

    let macd_line = *macd_line_series
        .last()
        .expect("slow series is non-empty, so the macd series is too");

    let signal_line = match ema_series(&macd_line_series, MACD_SIGNAL).last() {
        Some(&value) => value,
        // Fewer than 9 macd points: the signal tracks the line itself.
        None => macd_line,
    };

    Macd {
        macd_line,
        signal_line,
        histogram: macd_line - signal_line,
    }
}
