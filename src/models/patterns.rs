// =============================================================================
// Candlestick pattern recognizer / scorer
// =============================================================================
//
// Scans the trailing candles for named reversal shapes using body/wick ratio
// heuristics. Each detected pattern adds a bonus (bullish) or malus (bearish)
// onto a base score of 50; the dominant pattern is the one with the largest
// absolute contribution. Score 50 therefore means "no directional pattern".

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bars::OhlcvBar;

/// Neutral pattern score when nothing is detected.
const BASE_SCORE: f64 = 50.0;

/// Named candlestick patterns recognised by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandlePattern {
    Hammer,
    ShootingStar,
    BullishEngulfing,
    BearishEngulfing,
    MorningStar,
    EveningStar,
}

impl CandlePattern {
    /// Score contribution: positive for bullish shapes, negative for bearish.
    fn delta(self) -> f64 {
        match self {
            Self::Hammer => 10.0,
            Self::ShootingStar => -10.0,
            Self::BullishEngulfing => 15.0,
            Self::BearishEngulfing => -15.0,
            Self::MorningStar => 20.0,
            Self::EveningStar => -20.0,
        }
    }
}

impl std::fmt::Display for CandlePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Hammer => "Hammer",
            Self::ShootingStar => "Shooting Star",
            Self::BullishEngulfing => "Bullish Engulfing",
            Self::BearishEngulfing => "Bearish Engulfing",
            Self::MorningStar => "Morning Star",
            Self::EveningStar => "Evening Star",
        };
        write!(f, "{name}")
    }
}

/// Net pattern score and the dominant detected pattern, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternScore {
    /// `50 + Σ deltas`, clamped to `[0, 100]`.
    pub score: f64,
    /// Pattern with the largest absolute contribution.
    pub dominant: Option<CandlePattern>,
}

/// Score the most recent 1-, 2- and 3-candle formations.
///
/// Fewer bars than a formation needs simply skips that formation; an empty
/// series scores the neutral 50 with no pattern.
pub fn score_patterns(bars: &[OhlcvBar]) -> PatternScore {
    let mut detected: Vec<CandlePattern> = Vec::new();
    let n = bars.len();

    if n >= 1 {
        let last = &bars[n - 1];
        if is_hammer(last) {
            detected.push(CandlePattern::Hammer);
        }
        if is_shooting_star(last) {
            detected.push(CandlePattern::ShootingStar);
        }
    }

    if n >= 2 {
        let (prev, curr) = (&bars[n - 2], &bars[n - 1]);
        if is_bullish_engulfing(prev, curr) {
            detected.push(CandlePattern::BullishEngulfing);
        }
        if is_bearish_engulfing(prev, curr) {
            detected.push(CandlePattern::BearishEngulfing);
        }
    }

    if n >= 3 {
        let (first, second, third) = (&bars[n - 3], &bars[n - 2], &bars[n - 1]);
        if is_morning_star(first, second, third) {
            detected.push(CandlePattern::MorningStar);
        }
        if is_evening_star(first, second, third) {
            detected.push(CandlePattern::EveningStar);
        }
    }

    let score = (BASE_SCORE + detected.iter().map(|p| p.delta()).sum::<f64>()).clamp(0.0, 100.0);
    let dominant = detected
        .iter()
        .copied()
        .max_by(|a, b| a.delta().abs().total_cmp(&b.delta().abs()));

    if let Some(pattern) = dominant {
        debug!(%pattern, score = format!("{score:.1}"), "Candlestick pattern detected");
    }

    PatternScore { score, dominant }
}

// =============================================================================
// Shape heuristics
// =============================================================================

/// Long lower wick (>= 2x body), short upper wick: buyers rejected the low.
fn is_hammer(bar: &OhlcvBar) -> bool {
    let body = bar.body();
    body > 0.0 && bar.lower_wick() >= 2.0 * body && bar.upper_wick() <= body
}

/// Long upper wick (>= 2x body), short lower wick: sellers rejected the high.
fn is_shooting_star(bar: &OhlcvBar) -> bool {
    let body = bar.body();
    body > 0.0 && bar.upper_wick() >= 2.0 * body && bar.lower_wick() <= body
}

/// Bullish body fully engulfing the previous bearish body.
fn is_bullish_engulfing(prev: &OhlcvBar, curr: &OhlcvBar) -> bool {
    prev.is_bearish()
        && curr.is_bullish()
        && curr.open <= prev.close
        && curr.close >= prev.open
        && curr.body() > prev.body()
}

/// Bearish body fully engulfing the previous bullish body.
fn is_bearish_engulfing(prev: &OhlcvBar, curr: &OhlcvBar) -> bool {
    prev.is_bullish()
        && curr.is_bearish()
        && curr.open >= prev.close
        && curr.close <= prev.open
        && curr.body() > prev.body()
}

/// Bearish candle, small-bodied pause, then a bullish close above the
/// midpoint of the first body.
fn is_morning_star(first: &OhlcvBar, second: &OhlcvBar, third: &OhlcvBar) -> bool {
    let first_mid = (first.open + first.close) / 2.0;
    first.is_bearish()
        && second.body() < first.body() * 0.5
        && third.is_bullish()
        && third.close > first_mid
}

/// Mirror of the morning star: bullish, pause, bearish close below the
/// midpoint of the first body.
fn is_evening_star(first: &OhlcvBar, second: &OhlcvBar, third: &OhlcvBar) -> bool {
    let first_mid = (first.open + first.close) / 2.0;
    first.is_bullish()
        && second.body() < first.body() * 0.5
        && third.is_bearish()
        && third.close < first_mid
}
