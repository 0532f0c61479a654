// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator implementations over close/high/low series
// ordered oldest -> newest. None of these functions error: short input
// degrades to each indicator's documented neutral fallback so the analysis
// pipeline never halts on sparse market data.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod pivots;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stochastic;
