// =============================================================================
// Average True Range (ATR), trailing simple mean
// =============================================================================
//
// ATR measures volatility by decomposing the full range of each bar:
//
//   TR  = max(H - L, |H - prev_close|, |L - prev_close|)
//   ATR = mean of the trailing `period` TR values
//
// Needs `period + 1` bars (each TR requires a previous close); anything less
// returns 0.0 so the pipeline degrades instead of halting.

use crate::bars::OhlcvBar;

/// Mean of the trailing `period` true ranges.
///
/// Returns 0.0 when `period == 0` or fewer than `period + 1` bars exist.
pub fn atr(bars: &[OhlcvBar], period: usize) -> f64 {
    if period == 0 || bars.len() < period + 1 {
        return 0.0;
    }

    let window = &bars[bars.len() - period - 1..];
    let tr_sum: f64 = window
        .windows(2)
        .map(|pair| true_range(&pair[1], pair[0].close))
        .sum();

    tr_sum / period as f64
}

/// ATR as a percentage of the latest close.
///
/// Useful for comparing volatility across assets with different price
/// scales. Returns 0.0 when ATR is unavailable or the latest close is 0.
pub fn atr_percent(bars: &[OhlcvBar], period: usize) -> f64 {
    let value = atr(bars, period);
    match bars.last() {
        Some(last) if last.close != 0.0 => value / last.close * 100.0,
        _ => 0.0,
    }
}

fn true_range(bar: &OhlcvBar, prev_close: f64) -> f64 {
    let hl = bar.high - bar.low;
    let hc = (bar.high - prev_close).abs();
    let lc = (bar.low - prev_close).abs();
    hl.max(hc).max(lc)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bar(time: i64, open: f64, high: f64, low: f64, close: f64) -> OhlcvBar {
        OhlcvBar {
            time,
            open,
            high,
            low,
            close,
            volume: 100.0,
        }
    }

    fn constant_range_bars(n: usize) -> Vec<OhlcvBar> {
        (0..n)
            .map(|i| {
                let base = 100.0 + i as f64 * 0.1;
                bar(i as i64, base, base + 5.0, base - 5.0, base)
            })
            .collect()
    }

    #[test]
    fn atr_insufficient_data_is_zero() {
        // Need period + 1 = 15 bars for period 14, only have 10.
        let bars = constant_range_bars(10);
        assert_eq!(atr(&bars, 14), 0.0);
    }

    #[test]
    fn atr_period_zero_is_zero() {
        let bars = constant_range_bars(20);
        assert_eq!(atr(&bars, 0), 0.0);
    }

    #[test]
    fn atr_constant_range_converges_to_range() {
        // Every bar spans 10 with negligible drift => ATR near 10.
        let bars = constant_range_bars(30);
        let value = atr(&bars, 14);
        assert!((value - 10.0).abs() < 0.5, "expected ~10, got {value}");
    }

    #[test]
    fn atr_uses_prev_close_for_gaps() {
        // Gap up: |H - prev_close| dominates H - L.
        let bars = vec![
            bar(0, 100.0, 105.0, 95.0, 95.0),
            bar(1, 110.0, 115.0, 108.0, 112.0), // TR = |115 - 95| = 20
            bar(2, 112.0, 118.0, 110.0, 115.0),
            bar(3, 115.0, 120.0, 113.0, 118.0),
        ];
        let value = atr(&bars, 3);
        assert!(value > 7.0, "ATR should reflect the gap, got {value}");
    }

    #[test]
    fn atr_exact_minimum_data() {
        // period 3 needs exactly 4 bars.
        let bars = constant_range_bars(4);
        let value = atr(&bars, 3);
        assert!(value > 0.0);
        assert!(value.is_finite());
    }

    #[test]
    fn atr_percent_scales_by_close() {
        let bars = constant_range_bars(30);
        let pct = atr_percent(&bars, 14);
        let raw = atr(&bars, 14);
        let last_close = bars.last().unwrap().close;
        assert_relative_eq!(pct, raw / last_close * 100.0, epsilon = 1e-12);
    }

    #[test]
    fn atr_percent_zero_close_guard() {
        let bars = vec![
            bar(0, 0.0, 1.0, -1.0, 0.0),
            bar(1, 0.0, 1.0, -1.0, 0.0),
            bar(2, 0.0, 1.0, -1.0, 0.0),
            bar(3, 0.0, 1.0, -1.0, 0.0),
        ];
        assert_eq!(atr_percent(&bars, 3), 0.0);
    }
}
