// =============================================================================
// Optimal entry/exit targets, stop-loss / take-profit, risk-reward
// =============================================================================
//
// Combines RSI, Bollinger position, the nearest clustered support/resistance,
// Fibonacci levels and the candlestick pattern score into one target price
// per side, each with a confidence percentage and a human-readable list of
// contributing reasons.
//
//   stop_loss   = nearest support - ATR cushion
//   take_profit = nearest resistance
//   risk_reward = (take_profit - entry) / (entry - stop_loss)

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::indicators::bollinger::BollingerBands;
use crate::levels::dynamic::DynamicLevels;
use crate::levels::fibonacci::FibonacciLevels;

/// ATR multiplier for the stop-loss cushion below support.
const STOP_ATR_MULTIPLIER: f64 = 1.5;

/// Relative floor for the stop cushion when ATR is unavailable (degraded
/// short-series input reports ATR = 0).
const MIN_STOP_CUSHION_PCT: f64 = 0.005;

/// Fallback distance for a missing support/resistance side.
const FALLBACK_LEVEL_PCT: f64 = 0.03;

/// Everything the target synthesizer consumes.
#[derive(Debug, Clone, Copy)]
pub struct TargetInputs<'a> {
    pub current_price: f64,
    pub rsi: f64,
    /// Pattern score in [0, 100]; > 50 leans bullish.
    pub pattern_score: f64,
    pub atr: f64,
    pub bollinger: BollingerBands,
    pub dynamic: &'a DynamicLevels,
    pub fibonacci: &'a FibonacciLevels,
}

/// Buy/sell targets with confidence, reasoning and the risk block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub optimal_buy_price: f64,
    pub optimal_sell_price: f64,
    pub buy_confidence: f64,
    pub sell_confidence: f64,
    pub buy_reasoning: Vec<String>,
    pub sell_reasoning: Vec<String>,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub risk_reward_ratio: f64,
}

/// Synthesize the trade plan from indicator and level inputs.
///
/// All outputs are finite for finite inputs; a non-positive risk denominator
/// reports risk-reward 0 rather than dividing by zero.
pub fn trade_plan(inputs: &TargetInputs<'_>) -> TradePlan {
    let price = inputs.current_price;

    let support = nearest_below(
        price,
        &[
            inputs.dynamic.strong_support,
            inputs.dynamic.weak_support,
            inputs.bollinger.lower,
            inputs.fibonacci.level_618,
        ],
    )
    .unwrap_or(price * (1.0 - FALLBACK_LEVEL_PCT));

    let resistance = nearest_above(
        price,
        &[
            inputs.dynamic.strong_resistance,
            inputs.dynamic.weak_resistance,
            inputs.bollinger.upper,
            inputs.fibonacci.level_236,
        ],
    )
    .unwrap_or(price * (1.0 + FALLBACK_LEVEL_PCT));

    // --- Buy side -----------------------------------------------------------
    let mut buy_reasoning = vec![format!("Support level at {support:.2}")];
    let mut buy_confidence = 50.0 + inputs.dynamic.confidence * 0.15;
    let mut optimal_buy = support;

    if inputs.rsi < 30.0 {
        // Oversold markets rarely fall all the way back to support; bid
        // halfway between support and spot.
        optimal_buy = (optimal_buy + price) / 2.0;
        buy_confidence += 15.0;
        buy_reasoning.push(format!("RSI oversold at {:.1}", inputs.rsi));
    }
    if price < inputs.bollinger.lower {
        buy_confidence += 10.0;
        buy_reasoning.push("Price below lower Bollinger band".to_string());
    }
    if inputs.pattern_score > 60.0 {
        buy_confidence += 10.0;
        buy_reasoning.push(format!(
            "Bullish candlestick pattern (score {:.0})",
            inputs.pattern_score
        ));
    }

    // --- Sell side ----------------------------------------------------------
    let mut sell_reasoning = vec![format!("Resistance level at {resistance:.2}")];
    let mut sell_confidence = 50.0 + inputs.dynamic.confidence * 0.15;
    let mut optimal_sell = resistance;

    if inputs.rsi > 70.0 {
        optimal_sell = (optimal_sell + price) / 2.0;
        sell_confidence += 15.0;
        sell_reasoning.push(format!("RSI overbought at {:.1}", inputs.rsi));
    }
    if price > inputs.bollinger.upper {
        sell_confidence += 10.0;
        sell_reasoning.push("Price above upper Bollinger band".to_string());
    }
    if inputs.pattern_score < 40.0 {
        sell_confidence += 10.0;
        sell_reasoning.push(format!(
            "Bearish candlestick pattern (score {:.0})",
            inputs.pattern_score
        ));
    }

    // --- Risk block ---------------------------------------------------------
    let cushion = (inputs.atr * STOP_ATR_MULTIPLIER).max(price.abs() * MIN_STOP_CUSHION_PCT);
    let stop_loss = support - cushion;
    let take_profit = resistance;

    let risk = optimal_buy - stop_loss;
    let reward = take_profit - optimal_buy;
    let risk_reward_ratio = if risk > 0.0 && reward.is_finite() {
        (reward / risk).max(0.0)
    } else {
        0.0
    };

    let plan = TradePlan {
        optimal_buy_price: optimal_buy,
        optimal_sell_price: optimal_sell,
        buy_confidence: buy_confidence.clamp(0.0, 100.0),
        sell_confidence: sell_confidence.clamp(0.0, 100.0),
        buy_reasoning,
        sell_reasoning,
        stop_loss,
        take_profit,
        risk_reward_ratio,
    };

    debug!(
        buy = format!("{:.2}", plan.optimal_buy_price),
        sell = format!("{:.2}", plan.optimal_sell_price),
        stop = format!("{:.2}", plan.stop_loss),
        take = format!("{:.2}", plan.take_profit),
        rr = format!("{:.2}", plan.risk_reward_ratio),
        "Trade plan synthesized"
    );

    plan
}

/// Largest candidate strictly below `price`.
fn nearest_below(price: f64, candidates: &[f64]) -> Option<f64> {
    candidates
        .iter()
        .copied()
        .filter(|&c| c.is_finite() && c < price && c > 0.0)
        .max_by(f64::total_cmp)
}

/// Smallest candidate strictly above `price`.
fn nearest_above(price: f64, candidates: &[f64]) -> Option<f64> {
    candidates
        .iter()
        .copied()
        .filter(|&c| c.is_finite() && c > price)
        .min_by(f64::total_cmp)
}
