// =============================================================================
// Engine error types
// =============================================================================
//
// The engine itself is total over well-formed numeric input: short series
// degrade to documented neutral defaults and never error. The only failure
// path is malformed input rejected up-front by `bars::validate`.

use thiserror::Error;

/// Errors raised while validating an OHLCV series before analysis.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// The input series contains no bars at all.
    #[error("empty OHLCV series: at least one bar is required")]
    EmptySeries,

    /// A bar carries a NaN or infinite value in the named field.
    #[error("non-finite value in field `{field}` at bar index {index}")]
    NonFiniteField {
        /// Index of the offending bar in the input slice.
        index: usize,
        /// Name of the offending field (`open`, `high`, `low`, `close`, `volume`).
        field: &'static str,
    },

    /// Bar timestamps are not strictly increasing.
    #[error("non-monotonic timestamp at bar index {index}: time must be strictly increasing")]
    NonMonotonicTime {
        /// Index of the first bar whose time is <= its predecessor's.
        index: usize,
    },
}
