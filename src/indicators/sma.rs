// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// SMA is the arithmetic mean of the last `period` closes. When fewer than
// `period` values exist the function falls back to the single latest value,
// a deliberate graceful-insufficient-data policy (not a partial average), so
// a 200-period SMA over 30 bars tracks the spot price instead of reporting a
// misleadingly smoothed figure.

/// Simple moving average of the last `period` prices.
///
/// # Edge cases
/// - Empty input => 0.0.
/// - `period == 0` or fewer than `period` prices => the latest price
///   (fallback policy, see module header).
pub fn sma(prices: &[f64], period: usize) -> f64 {
    let Some(&last) = prices.last() else {
        return 0.0;
    };
    if period == 0 || prices.len() < period {
        return last;
    }
    let window = &prices[prices.len() - period..];
    window.iter().sum::<f64>() / period as f64
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sma_empty_is_zero() {
        assert_eq!(sma(&[], 20), 0.0);
    }

    #[test]
    fn sma_basic() {
        let prices: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        // Last 5 values: 6..=10, mean 8.
        assert_relative_eq!(sma(&prices, 5), 8.0);
    }

    #[test]
    fn sma_full_window() {
        let prices = [2.0, 4.0, 6.0];
        assert_relative_eq!(sma(&prices, 3), 4.0);
    }

    #[test]
    fn sma_short_input_falls_back_to_last_value() {
        // 5 elements, 20-period request: the answer is the last element,
        // not a partial average.
        let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(sma(&prices, 20), 5.0);
    }

    #[test]
    fn sma_period_zero_falls_back_to_last_value() {
        let prices = [1.0, 2.0, 3.0];
        assert_relative_eq!(sma(&prices, 0), 3.0);
    }
}
