// =============================================================================
// Analysis engine: the one-way pipeline from bars to AnalysisResult
// =============================================================================
//
// Pure and stateless: the same OHLCV input (and Monte Carlo seed) always
// produces the same result. Stages run leaf to root:
//
//   bars -> statistics + indicators -> predictive models
//        -> level synthesizer -> consensus -> AnalysisResult
//
// No stage mutates another's output; everything is computed fresh per call
// and the result is never persisted by the engine.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bars::{self, OhlcvBar};
use crate::config::AnalysisConfig;
use crate::consensus::{consensus, ConsensusInputs};
use crate::error::AnalysisError;
use crate::indicators::atr::{atr, atr_percent};
use crate::indicators::bollinger::{annualized_volatility, bollinger, daily_volatility};
use crate::indicators::ema::{ema, macd};
use crate::indicators::pivots::{pivot_points, PivotPoints};
use crate::indicators::roc::roc;
use crate::indicators::rsi::rsi;
use crate::indicators::sma::sma;
use crate::indicators::stochastic::stochastic;
use crate::levels::dynamic::{dynamic_levels, DynamicLevels};
use crate::levels::fibonacci::{fibonacci_levels, FibonacciLevels};
use crate::levels::targets::{trade_plan, TargetInputs};
use crate::models::holt_winters;
use crate::models::knn::knn_forecast;
use crate::models::monte_carlo::{simulate, MonteCarloForecast};
use crate::models::patterns::score_patterns;
use crate::stats::linear_regression;
use crate::types::{OscillatorSignal, Signal, TrendDirection, VolatilityLevel};

// Classification thresholds, applied consistently across the result.
const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;
const STOCH_OVERBOUGHT: f64 = 80.0;
const STOCH_OVERSOLD: f64 = 20.0;
/// Regression slope as % of price per bar below which the trend is flat.
const TREND_DEAD_BAND_PCT: f64 = 0.02;

// =============================================================================
// Result blocks
// =============================================================================

/// Linear-regression block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionSummary {
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
    /// Line extrapolated one bar past the end of the series.
    pub predicted_price: f64,
    pub trend: TrendDirection,
    /// R² expressed as a 0-100 confidence percentage.
    pub confidence: f64,
}

/// Moving averages and MACD block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub ema12: f64,
    pub ema26: f64,
    pub macd_line: f64,
    pub signal_line: f64,
    pub macd_histogram: f64,
    /// Price / SMA stack alignment.
    pub trend: TrendDirection,
}

/// RSI block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiSummary {
    pub value: f64,
    pub signal: OscillatorSignal,
}

/// Stochastic oscillator block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticSummary {
    pub k: f64,
    pub d: f64,
    pub signal: OscillatorSignal,
}

/// ATR block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtrSummary {
    pub value: f64,
    /// ATR as a percentage of the latest close.
    pub percent: f64,
    pub level: VolatilityLevel,
}

/// Momentum / rate-of-change block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumSummary {
    pub roc10: f64,
    pub roc20: f64,
    pub signal: TrendDirection,
}

/// Return volatility and Bollinger block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilitySummary {
    /// Population stddev of daily simple returns.
    pub daily_volatility: f64,
    /// Daily volatility annualized by √252.
    pub annualized_volatility: f64,
    pub bollinger_upper: f64,
    pub bollinger_middle: f64,
    pub bollinger_lower: f64,
    pub level: VolatilityLevel,
}

/// Predictive-model block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPredictions {
    /// KNN predicted next-bar move in percent.
    pub knn_prediction: f64,
    pub knn_confidence: f64,
    pub monte_carlo: MonteCarloForecast,
    /// Holt-Winters price forecast at the configured horizon.
    pub exponential_smoothing: f64,
    pub pattern_score: f64,
    /// Dominant pattern name, or "None".
    pub pattern_name: String,
    pub consensus_signal: Signal,
    pub consensus_score: f64,
}

/// Level-synthesizer block: Fibonacci + dynamic bands + the trade plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalPrices {
    pub fibonacci: FibonacciLevels,
    pub dynamic_levels: DynamicLevels,
    pub optimal_buy_price: f64,
    pub optimal_sell_price: f64,
    pub buy_confidence: f64,
    pub sell_confidence: f64,
    pub buy_reasoning: Vec<String>,
    pub sell_reasoning: Vec<String>,
    pub risk_reward_ratio: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

/// The complete, immutable analysis bundle for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub current_price: f64,
    pub linear_regression: RegressionSummary,
    pub moving_averages: MovingAverages,
    pub rsi: RsiSummary,
    pub stochastic: StochasticSummary,
    pub atr: AtrSummary,
    pub momentum: MomentumSummary,
    pub volatility: VolatilitySummary,
    pub levels: PivotPoints,
    pub ml_predictions: ModelPredictions,
    pub optimal_prices: OptimalPrices,
}

// =============================================================================
// Pipeline
// =============================================================================

/// Run the full analysis pipeline over a validated bar series.
///
/// The only error path is malformed input (empty series, non-finite fields,
/// non-monotonic timestamps). Short-but-well-formed series always succeed,
/// degrading per indicator to the documented neutral defaults.
pub fn analyze(
    series: &[OhlcvBar],
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    bars::validate(series)?;

    let closes = bars::closes(series);
    let highs = bars::highs(series);
    let lows = bars::lows(series);
    let current_price = closes[closes.len() - 1];

    // --- Stage 1: statistics + indicators (mutually independent) ------------
    let x: Vec<f64> = (0..closes.len()).map(|i| i as f64).collect();
    let fit = linear_regression(&x, &closes);
    let predicted_price = fit.slope * closes.len() as f64 + fit.intercept;
    let linear_regression = RegressionSummary {
        slope: fit.slope,
        intercept: fit.intercept,
        r2: fit.r2,
        predicted_price,
        trend: slope_trend(fit.slope, current_price),
        confidence: fit.r2 * 100.0,
    };

    let sma20 = sma(&closes, 20);
    let sma50 = sma(&closes, 50);
    let macd_snapshot = macd(&closes);
    let moving_averages = MovingAverages {
        sma20,
        sma50,
        sma200: sma(&closes, 200),
        ema12: ema(&closes, 12),
        ema26: ema(&closes, 26),
        macd_line: macd_snapshot.macd_line,
        signal_line: macd_snapshot.signal_line,
        macd_histogram: macd_snapshot.histogram,
        trend: stack_trend(current_price, sma20, sma50),
    };

    let rsi_value = rsi(&closes, config.rsi_period);
    let rsi_summary = RsiSummary {
        value: rsi_value,
        signal: oscillator_signal(rsi_value, RSI_OVERBOUGHT, RSI_OVERSOLD),
    };

    let stoch = stochastic(&closes, &highs, &lows, config.stochastic_period);
    let stochastic_summary = StochasticSummary {
        k: stoch.k,
        d: stoch.d,
        signal: oscillator_signal(stoch.k, STOCH_OVERBOUGHT, STOCH_OVERSOLD),
    };

    let atr_value = atr(series, config.atr_period);
    let atr_pct = atr_percent(series, config.atr_period);
    let atr_summary = AtrSummary {
        value: atr_value,
        percent: atr_pct,
        level: atr_level(atr_pct),
    };

    let roc10 = roc(&closes, 10);
    let roc20 = roc(&closes, 20);
    let momentum = MomentumSummary {
        roc10,
        roc20,
        signal: momentum_trend(roc10, roc20),
    };

    let bands = bollinger(&closes, config.bollinger_period, config.bollinger_mult);
    let daily = daily_volatility(&closes);
    let annualized = annualized_volatility(daily);
    let volatility = VolatilitySummary {
        daily_volatility: daily,
        annualized_volatility: annualized,
        bollinger_upper: bands.upper,
        bollinger_middle: bands.middle,
        bollinger_lower: bands.lower,
        level: volatility_level(annualized),
    };

    let last = &series[series.len() - 1];
    let levels = pivot_points(last.high, last.low, last.close);

    debug!(
        price = format!("{current_price:.2}"),
        rsi = format!("{:.1}", rsi_value),
        stoch_k = format!("{:.1}", stoch.k),
        atr_pct = format!("{atr_pct:.2}"),
        "Indicator stage complete"
    );

    // --- Stage 2: predictive models -----------------------------------------
    let knn = knn_forecast(&closes, &config.knn);
    let monte_carlo = simulate(&closes, &config.monte_carlo);
    let smoothing_forecast = holt_winters::forecast(&closes, &config.smoothing);
    let pattern = score_patterns(series);

    // --- Stage 3: level synthesizer -----------------------------------------
    let fibonacci = fibonacci_levels(&highs, &lows);
    let dynamic = dynamic_levels(series);
    let plan = trade_plan(&TargetInputs {
        current_price,
        rsi: rsi_value,
        pattern_score: pattern.score,
        atr: atr_value,
        bollinger: bands,
        dynamic: &dynamic,
        fibonacci: &fibonacci,
    });

    // --- Stage 4: consensus ---------------------------------------------------
    let verdict = consensus(&ConsensusInputs {
        regression_trend: linear_regression.trend,
        ma_trend: moving_averages.trend,
        rsi: rsi_summary.signal,
        stochastic: stochastic_summary.signal,
        momentum: momentum.signal,
        pattern_score: pattern.score,
        knn_move_pct: knn.predicted_move_pct,
        mc_bullish_probability: monte_carlo.bullish_probability,
    });

    let ml_predictions = ModelPredictions {
        knn_prediction: knn.predicted_move_pct,
        knn_confidence: knn.confidence,
        monte_carlo,
        exponential_smoothing: smoothing_forecast,
        pattern_score: pattern.score,
        pattern_name: pattern
            .dominant
            .map(|p| p.to_string())
            .unwrap_or_else(|| "None".to_string()),
        consensus_signal: verdict.signal,
        consensus_score: verdict.score,
    };

    let optimal_prices = OptimalPrices {
        fibonacci,
        dynamic_levels: dynamic,
        optimal_buy_price: plan.optimal_buy_price,
        optimal_sell_price: plan.optimal_sell_price,
        buy_confidence: plan.buy_confidence,
        sell_confidence: plan.sell_confidence,
        buy_reasoning: plan.buy_reasoning,
        sell_reasoning: plan.sell_reasoning,
        risk_reward_ratio: plan.risk_reward_ratio,
        stop_loss: plan.stop_loss,
        take_profit: plan.take_profit,
    };

    Ok(AnalysisResult {
        current_price,
        linear_regression,
        moving_averages,
        rsi: rsi_summary,
        stochastic: stochastic_summary,
        atr: atr_summary,
        momentum,
        volatility,
        levels,
        ml_predictions,
        optimal_prices,
    })
}

// =============================================================================
// Classification helpers
// =============================================================================

/// Regression trend with a dead band: the slope must move price by more than
/// `TREND_DEAD_BAND_PCT` percent per bar to count as directional.
fn slope_trend(slope: f64, price: f64) -> TrendDirection {
    if price.abs() < f64::EPSILON {
        return TrendDirection::Neutral;
    }
    let slope_pct = slope / price * 100.0;
    if slope_pct > TREND_DEAD_BAND_PCT {
        TrendDirection::Bullish
    } else if slope_pct < -TREND_DEAD_BAND_PCT {
        TrendDirection::Bearish
    } else {
        TrendDirection::Neutral
    }
}

/// Price above a rising SMA stack is bullish; below a falling stack bearish.
fn stack_trend(price: f64, sma20: f64, sma50: f64) -> TrendDirection {
    if price > sma20 && sma20 > sma50 {
        TrendDirection::Bullish
    } else if price < sma20 && sma20 < sma50 {
        TrendDirection::Bearish
    } else {
        TrendDirection::Neutral
    }
}

fn oscillator_signal(value: f64, overbought: f64, oversold: f64) -> OscillatorSignal {
    if value > overbought {
        OscillatorSignal::Overbought
    } else if value < oversold {
        OscillatorSignal::Oversold
    } else {
        OscillatorSignal::Neutral
    }
}

fn momentum_trend(roc10: f64, roc20: f64) -> TrendDirection {
    if roc10 > 0.0 && roc20 > 0.0 {
        TrendDirection::Bullish
    } else if roc10 < 0.0 && roc20 < 0.0 {
        TrendDirection::Bearish
    } else {
        TrendDirection::Neutral
    }
}

/// Bucket ATR as a percentage of price.
fn atr_level(atr_pct: f64) -> VolatilityLevel {
    if atr_pct < 1.0 {
        VolatilityLevel::Low
    } else if atr_pct < 3.0 {
        VolatilityLevel::Moderate
    } else if atr_pct < 6.0 {
        VolatilityLevel::High
    } else {
        VolatilityLevel::Extreme
    }
}

/// Bucket annualized return volatility (0.15 = 15% a year).
fn volatility_level(annualized: f64) -> VolatilityLevel {
    if annualized < 0.15 {
        VolatilityLevel::Low
    } else if annualized < 0.30 {
        VolatilityLevel::Moderate
    } else if annualized < 0.60 {
        VolatilityLevel::High
    } else {
        VolatilityLevel::Extreme
    }
}
