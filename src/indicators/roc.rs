// =============================================================================
// Rate of Change (ROC) momentum indicator
// =============================================================================
//
// ROC is the percentage change in price over a look-back period:
//   ROC = (current - past) / past * 100
//
// Positive ROC indicates upward momentum, negative indicates downward.

/// Percentage change between the latest price and the one `period` bars back.
///
/// Returns 0.0 when there is insufficient history or the past price is 0
/// (zero-division guard).
pub fn roc(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() <= period {
        return 0.0;
    }

    let current = prices[prices.len() - 1];
    let past = prices[prices.len() - 1 - period];
    if past == 0.0 {
        return 0.0;
    }

    (current - past) / past * 100.0
}
