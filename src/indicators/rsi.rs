// =============================================================================
// Relative Strength Index (RSI), simple-average variant
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes:
//
//   avg_gain = mean of up-moves over the trailing `period` deltas
//   avg_loss = mean of down-moves over the trailing `period` deltas
//   RS       = avg_gain / avg_loss
//   RSI      = 100 - 100 / (1 + RS)
//
// This is the plain trailing-average form (not Wilder's recursive smoothing).
//
// Thresholds: RSI > 70 => overbought, RSI < 30 => oversold.

/// Most recent RSI value over the trailing `period` deltas.
///
/// # Edge cases
/// - Fewer than `period + 1` prices (or `period == 0`) => neutral 50.0.
/// - `avg_loss == 0` (no down moves, including a perfectly flat window)
///   => 100.0, never a division by zero.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period + 1 {
        return 50.0;
    }

    let window = &prices[prices.len() - period - 1..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in window.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gain_sum += delta;
        } else {
            loss_sum += -delta;
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rsi_insufficient_data_is_neutral() {
        // 14 prices give only 13 deltas, below the 14 required.
        let prices: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert_relative_eq!(rsi(&prices, 14), 50.0);
    }

    #[test]
    fn rsi_empty_is_neutral() {
        assert_relative_eq!(rsi(&[], 14), 50.0);
    }

    #[test]
    fn rsi_period_zero_is_neutral() {
        assert_relative_eq!(rsi(&[1.0, 2.0, 3.0], 0), 50.0);
    }

    #[test]
    fn rsi_monotone_rising_is_overbought() {
        let prices: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        let value = rsi(&prices, 14);
        assert!(value > 70.0, "expected overbought, got {value}");
    }

    #[test]
    fn rsi_monotone_falling_is_oversold() {
        let prices: Vec<f64> = (1..=25).rev().map(|x| x as f64).collect();
        let value = rsi(&prices, 14);
        assert!(value < 30.0, "expected oversold, got {value}");
    }

    #[test]
    fn rsi_all_gains_is_exactly_100() {
        let prices: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        assert_relative_eq!(rsi(&prices, 14), 100.0);
    }

    #[test]
    fn rsi_flat_series_clamps_to_100_without_panicking() {
        // avg_loss == 0 on a constant series; the zero-division guard fires.
        let prices = vec![100.0; 30];
        assert_relative_eq!(rsi(&prices, 14), 100.0);
    }

    #[test]
    fn rsi_stays_in_bounds() {
        let prices = [
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let value = rsi(&prices, 14);
        assert!((0.0..=100.0).contains(&value), "RSI {value} out of range");
    }

    #[test]
    fn rsi_balanced_moves_near_50() {
        // Alternating +1/-1 moves: equal average gain and loss => RSI 50.
        let mut prices = vec![100.0];
        for i in 0..30 {
            let last = *prices.last().unwrap();
            prices.push(if i % 2 == 0 { last + 1.0 } else { last - 1.0 });
        }
        assert_relative_eq!(rsi(&prices, 14), 50.0, epsilon = 1e-9);
    }
}
