// =============================================================================
// Consensus Aggregator
// =============================================================================
//
// Maps every model's directional read onto a common -1..+1 scale, averages
// them with equal weight, and buckets the result:
//
//   score >  0.6  => STRONG_BUY        score < -0.6  => STRONG_SELL
//   score >  0.2  => BUY               score < -0.2  => SELL
//   otherwise     => HOLD
//
// Thresholds are fixed here and documented once; every consumer sees the
// same bucketing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{OscillatorSignal, Signal, TrendDirection};

/// Score boundary for the strong buckets.
const STRONG_THRESHOLD: f64 = 0.6;

/// Score boundary for the plain buy/sell buckets.
const LEAN_THRESHOLD: f64 = 0.2;

/// Pattern score above/below which the pattern vote leaves neutral.
const PATTERN_BULLISH: f64 = 60.0;
const PATTERN_BEARISH: f64 = 40.0;

/// Predicted KNN move (percent) needed to register a directional vote.
const KNN_MOVE_THRESHOLD: f64 = 0.5;

/// Monte Carlo bullish-probability band treated as neutral.
const MC_BULLISH: f64 = 0.55;
const MC_BEARISH: f64 = 0.45;

/// Directional inputs feeding the consensus.
#[derive(Debug, Clone, Copy)]
pub struct ConsensusInputs {
    /// Linear-regression trend direction.
    pub regression_trend: TrendDirection,
    /// Moving-average stack alignment.
    pub ma_trend: TrendDirection,
    pub rsi: OscillatorSignal,
    pub stochastic: OscillatorSignal,
    pub momentum: TrendDirection,
    /// Candlestick pattern score in [0, 100].
    pub pattern_score: f64,
    /// KNN predicted next move in percent.
    pub knn_move_pct: f64,
    /// Monte Carlo bullish probability in [0, 1].
    pub mc_bullish_probability: f64,
}

/// Aggregated verdict plus its raw score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Consensus {
    pub signal: Signal,
    /// Mean of the individual votes, in `[-1, 1]`.
    pub score: f64,
}

/// Average all eight votes and bucket the result.
pub fn consensus(inputs: &ConsensusInputs) -> Consensus {
    let votes = [
        inputs.regression_trend.score(),
        inputs.ma_trend.score(),
        inputs.rsi.score(),
        inputs.stochastic.score(),
        inputs.momentum.score(),
        pattern_vote(inputs.pattern_score),
        knn_vote(inputs.knn_move_pct),
        monte_carlo_vote(inputs.mc_bullish_probability),
    ];

    let score = votes.iter().sum::<f64>() / votes.len() as f64;

    let signal = if score > STRONG_THRESHOLD {
        Signal::StrongBuy
    } else if score > LEAN_THRESHOLD {
        Signal::Buy
    } else if score < -STRONG_THRESHOLD {
        Signal::StrongSell
    } else if score < -LEAN_THRESHOLD {
        Signal::Sell
    } else {
        Signal::Hold
    };

    debug!(
        score = format!("{score:.3}"),
        %signal,
        "Consensus aggregated"
    );

    Consensus { signal, score }
}

fn pattern_vote(score: f64) -> f64 {
    if score > PATTERN_BULLISH {
        1.0
    } else if score < PATTERN_BEARISH {
        -1.0
    } else {
        0.0
    }
}

fn knn_vote(move_pct: f64) -> f64 {
    if move_pct > KNN_MOVE_THRESHOLD {
        1.0
    } else if move_pct < -KNN_MOVE_THRESHOLD {
        -1.0
    } else {
        0.0
    }
}

fn monte_carlo_vote(bullish_probability: f64) -> f64 {
    if bullish_probability > MC_BULLISH {
        1.0
    } else if bullish_probability < MC_BEARISH {
        -1.0
    } else {
        0.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn all_bullish() -> ConsensusInputs {
        ConsensusInputs {
            regression_trend: TrendDirection::Bullish,
            ma_trend: TrendDirection::Bullish,
            rsi: OscillatorSignal::Oversold,
            stochastic: OscillatorSignal::Oversold,
            momentum: TrendDirection::Bullish,
            pattern_score: 75.0,
            knn_move_pct: 1.5,
            mc_bullish_probability: 0.8,
        }
    }

    fn all_bearish() -> ConsensusInputs {
        ConsensusInputs {
            regression_trend: TrendDirection::Bearish,
            ma_trend: TrendDirection::Bearish,
            rsi: OscillatorSignal::Overbought,
            stochastic: OscillatorSignal::Overbought,
            momentum: TrendDirection::Bearish,
            pattern_score: 25.0,
            knn_move_pct: -1.5,
            mc_bullish_probability: 0.2,
        }
    }

    fn all_neutral() -> ConsensusInputs {
        ConsensusInputs {
            regression_trend: TrendDirection::Neutral,
            ma_trend: TrendDirection::Neutral,
            rsi: OscillatorSignal::Neutral,
            stochastic: OscillatorSignal::Neutral,
            momentum: TrendDirection::Neutral,
            pattern_score: 50.0,
            knn_move_pct: 0.0,
            mc_bullish_probability: 0.5,
        }
    }

    #[test]
    fn unanimous_bullish_is_strong_buy() {
        let c = consensus(&all_bullish());
        assert_eq!(c.signal, Signal::StrongBuy);
        assert!((c.score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unanimous_bearish_is_strong_sell() {
        let c = consensus(&all_bearish());
        assert_eq!(c.signal, Signal::StrongSell);
        assert!((c.score + 1.0).abs() < 1e-12);
    }

    #[test]
    fn neutral_inputs_hold() {
        let c = consensus(&all_neutral());
        assert_eq!(c.signal, Signal::Hold);
        assert_eq!(c.score, 0.0);
    }

    #[test]
    fn mixed_inputs_hold() {
        let mut inputs = all_bullish();
        inputs.regression_trend = TrendDirection::Bearish;
        inputs.ma_trend = TrendDirection::Bearish;
        inputs.rsi = OscillatorSignal::Overbought;
        inputs.stochastic = OscillatorSignal::Overbought;
        // 4 bullish votes vs 4 bearish votes.
        let c = consensus(&inputs);
        assert_eq!(c.signal, Signal::Hold);
    }

    #[test]
    fn majority_bullish_is_at_least_buy() {
        let mut inputs = all_bullish();
        inputs.rsi = OscillatorSignal::Neutral;
        inputs.stochastic = OscillatorSignal::Neutral;
        inputs.pattern_score = 50.0;
        // 5 of 8 votes bullish => score 0.625 => still strong.
        let c = consensus(&inputs);
        assert!(matches!(c.signal, Signal::Buy | Signal::StrongBuy));
    }

    #[test]
    fn lean_bullish_is_plain_buy() {
        let mut inputs = all_neutral();
        inputs.regression_trend = TrendDirection::Bullish;
        inputs.ma_trend = TrendDirection::Bullish;
        inputs.momentum = TrendDirection::Bullish;
        // 3 of 8 => 0.375: above 0.2, below 0.6.
        let c = consensus(&inputs);
        assert_eq!(c.signal, Signal::Buy);
    }

    #[test]
    fn lean_bearish_is_plain_sell() {
        let mut inputs = all_neutral();
        inputs.regression_trend = TrendDirection::Bearish;
        inputs.ma_trend = TrendDirection::Bearish;
        inputs.momentum = TrendDirection::Bearish;
        let c = consensus(&inputs);
        assert_eq!(c.signal, Signal::Sell);
    }

    #[test]
    fn score_always_in_unit_interval() {
        let c = consensus(&all_bullish());
        assert!((-1.0..=1.0).contains(&c.score));
        let c = consensus(&all_bearish());
        assert!((-1.0..=1.0).contains(&c.score));
    }
}
