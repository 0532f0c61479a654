// =============================================================================
// OHLCV bar type and input validation
// =============================================================================
//
// One bar summarises trading activity for a single time bucket. Series are
// ordered oldest -> newest with strictly increasing timestamps and are
// immutable once handed to the engine.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// A single OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvBar {
    /// Bar open time as unix seconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    /// Absolute size of the candle body.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Length of the upper wick (high above the body).
    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    /// Length of the lower wick (low below the body).
    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    /// True when the candle closed above its open.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// True when the candle closed below its open.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Validate a series before it enters the analysis pipeline.
///
/// Rejects:
/// - empty input,
/// - any NaN / infinite price or volume field,
/// - timestamps that are not strictly increasing.
///
/// Deliberately tolerated: `high < low` and other market-data quirks; the
/// engine only refuses numbers it cannot compute with.
pub fn validate(bars: &[OhlcvBar]) -> Result<(), AnalysisError> {
    if bars.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }

    for (index, bar) in bars.iter().enumerate() {
        for (field, value) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
            ("volume", bar.volume),
        ] {
            if !value.is_finite() {
                return Err(AnalysisError::NonFiniteField { index, field });
            }
        }

        if index > 0 && bar.time <= bars[index - 1].time {
            return Err(AnalysisError::NonMonotonicTime { index });
        }
    }

    Ok(())
}

/// Extract the closing prices from a bar slice, preserving order.
pub fn closes(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Extract the high prices from a bar slice, preserving order.
pub fn highs(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter().map(|b| b.high).collect()
}

/// Extract the low prices from a bar slice, preserving order.
pub fn lows(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter().map(|b| b.low).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn bar(time: i64, open: f64, high: f64, low: f64, close: f64) -> OhlcvBar {
        OhlcvBar {
            time,
            open,
            high,
            low,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn validate_empty_series() {
        assert_eq!(validate(&[]), Err(AnalysisError::EmptySeries));
    }

    #[test]
    fn validate_accepts_well_formed_series() {
        let bars = vec![
            bar(1, 100.0, 105.0, 95.0, 102.0),
            bar(2, 102.0, 108.0, 100.0, 107.0),
        ];
        assert!(validate(&bars).is_ok());
    }

    #[test]
    fn validate_rejects_nan_close() {
        let bars = vec![bar(1, 100.0, 105.0, 95.0, f64::NAN)];
        assert_eq!(
            validate(&bars),
            Err(AnalysisError::NonFiniteField {
                index: 0,
                field: "close"
            })
        );
    }

    #[test]
    fn validate_rejects_infinite_volume() {
        let mut b = bar(1, 100.0, 105.0, 95.0, 102.0);
        b.volume = f64::INFINITY;
        assert_eq!(
            validate(&[b]),
            Err(AnalysisError::NonFiniteField {
                index: 0,
                field: "volume"
            })
        );
    }

    #[test]
    fn validate_rejects_duplicate_timestamps() {
        let bars = vec![
            bar(5, 100.0, 105.0, 95.0, 102.0),
            bar(5, 102.0, 108.0, 100.0, 107.0),
        ];
        assert_eq!(
            validate(&bars),
            Err(AnalysisError::NonMonotonicTime { index: 1 })
        );
    }

    #[test]
    fn validate_rejects_backwards_timestamps() {
        let bars = vec![
            bar(10, 100.0, 105.0, 95.0, 102.0),
            bar(9, 102.0, 108.0, 100.0, 107.0),
        ];
        assert_eq!(
            validate(&bars),
            Err(AnalysisError::NonMonotonicTime { index: 1 })
        );
    }

    #[test]
    fn candle_anatomy() {
        let b = bar(1, 100.0, 110.0, 95.0, 104.0);
        assert!((b.body() - 4.0).abs() < 1e-12);
        assert!((b.upper_wick() - 6.0).abs() < 1e-12);
        assert!((b.lower_wick() - 5.0).abs() < 1e-12);
        assert!(b.is_bullish());
        assert!(!b.is_bearish());
    }

    #[test]
    fn series_extractors_preserve_order() {
        let bars = vec![bar(1, 1.0, 2.0, 0.5, 1.5), bar(2, 1.5, 3.0, 1.0, 2.5)];
        assert_eq!(closes(&bars), vec![1.5, 2.5]);
        assert_eq!(highs(&bars), vec![2.0, 3.0]);
        assert_eq!(lows(&bars), vec![0.5, 1.0]);
    }
}
