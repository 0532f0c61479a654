// =============================================================================
// Classic Pivot Points
// =============================================================================
//
// Intraday support/resistance derived from the prior bar's high/low/close:
//
//   P  = (H + L + C) / 3
//   R1 = 2P - L          S1 = 2P - H
//   R2 = P + (H - L)     S2 = P - (H - L)

use serde::{Deserialize, Serialize};

/// Classic pivot levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    pub pivot: f64,
    pub resistance1: f64,
    pub resistance2: f64,
    pub support1: f64,
    pub support2: f64,
}

/// Compute the classic pivot formula from a single bar's high/low/close.
pub fn pivot_points(high: f64, low: f64, close: f64) -> PivotPoints {
    let pivot = (high + low + close) / 3.0;
    let range = high - low;
    PivotPoints {
        pivot,
        resistance1: 2.0 * pivot - low,
        resistance2: pivot + range,
        support1: 2.0 * pivot - high,
        support2: pivot - range,
    }
}
