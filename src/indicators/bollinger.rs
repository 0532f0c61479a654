// =============================================================================
// Bollinger Bands and return volatility
// =============================================================================
//
// Bands:   middle = SMA(period), upper/lower = middle ± mult * σ(window)
// σ is the population standard deviation of the trailing window.
//
// This module also derives the volatility block: the population stddev of
// simple daily returns and its √252 annualization.

use serde::{Deserialize, Serialize};

use crate::indicators::sma::sma;
use crate::stats::std_dev;

/// Trading days per year, for annualizing daily volatility.
const TRADING_DAYS: f64 = 252.0;

/// Bollinger band snapshot at the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Compute Bollinger bands over the trailing `period` prices.
///
/// Short input inherits the SMA fallback (middle = latest price) with the
/// deviation taken over whatever window is available, so the bands collapse
/// toward the spot price instead of disappearing. Empty input => all zeros.
pub fn bollinger(prices: &[f64], period: usize, mult: f64) -> BollingerBands {
    let middle = sma(prices, period);
    if prices.is_empty() {
        return BollingerBands {
            upper: 0.0,
            middle: 0.0,
            lower: 0.0,
        };
    }

    let span = period.max(1).min(prices.len());
    let sigma = std_dev(&prices[prices.len() - span..]);

    BollingerBands {
        upper: middle + mult * sigma,
        middle,
        lower: middle - mult * sigma,
    }
}

/// Population standard deviation of simple returns (`p_t / p_{t-1} - 1`).
///
/// Returns 0.0 with fewer than two prices. Bars with a zero previous close
/// are skipped rather than poisoning the series.
pub fn daily_volatility(prices: &[f64]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = prices
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect();
    std_dev(&returns)
}

/// Annualize a daily volatility figure by √252.
pub fn annualized_volatility(daily: f64) -> f64 {
    daily * TRADING_DAYS.sqrt()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bollinger_empty_is_zeroed() {
        let bb = bollinger(&[], 20, 2.0);
        assert_eq!(bb.upper, 0.0);
        assert_eq!(bb.middle, 0.0);
        assert_eq!(bb.lower, 0.0);
    }

    #[test]
    fn bollinger_bands_bracket_the_middle() {
        let prices: Vec<f64> = (1..=40).map(|x| x as f64).collect();
        let bb = bollinger(&prices, 20, 2.0);
        assert!(bb.upper > bb.middle);
        assert!(bb.lower < bb.middle);
        // Middle = SMA of 21..=40 = 30.5.
        assert_relative_eq!(bb.middle, 30.5);
    }

    #[test]
    fn bollinger_flat_series_collapses_bands() {
        let prices = vec![100.0; 30];
        let bb = bollinger(&prices, 20, 2.0);
        assert_relative_eq!(bb.upper, 100.0);
        assert_relative_eq!(bb.middle, 100.0);
        assert_relative_eq!(bb.lower, 100.0);
    }

    #[test]
    fn bollinger_short_input_tracks_last_price() {
        let prices = [10.0, 10.5, 11.0];
        let bb = bollinger(&prices, 20, 2.0);
        // SMA fallback: middle is the latest price; bands use the 3-point σ.
        assert_relative_eq!(bb.middle, 11.0);
        assert!(bb.upper >= bb.middle);
        assert!(bb.lower <= bb.middle);
    }

    #[test]
    fn bollinger_symmetric_around_middle() {
        let prices: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let bb = bollinger(&prices, 20, 2.0);
        assert_relative_eq!(bb.upper - bb.middle, bb.middle - bb.lower, epsilon = 1e-9);
    }

    #[test]
    fn daily_volatility_flat_is_zero() {
        assert_relative_eq!(daily_volatility(&[100.0; 20]), 0.0);
    }

    #[test]
    fn daily_volatility_single_price_is_zero() {
        assert_eq!(daily_volatility(&[100.0]), 0.0);
    }

    #[test]
    fn daily_volatility_alternating_returns() {
        // +1% then ~-0.99% alternating: stddev of returns is positive.
        let mut prices = vec![100.0];
        for i in 0..30 {
            let last = *prices.last().unwrap();
            prices.push(if i % 2 == 0 { last * 1.01 } else { last * 0.99 });
        }
        let vol = daily_volatility(&prices);
        assert!(vol > 0.0);
        assert!(vol < 0.02);
    }

    #[test]
    fn annualized_is_sqrt_252_times_daily() {
        assert_relative_eq!(annualized_volatility(0.01), 0.01 * 252.0_f64.sqrt());
    }
}
