// =============================================================================
// Predictive Models Module
// =============================================================================
//
// Statistical forecasters layered on top of the raw series and indicator
// outputs: similarity search (KNN), simulated price paths (Monte Carlo),
// trend extrapolation (Holt-Winters) and candlestick pattern scoring. All are
// pure functions; the Monte Carlo simulator draws its randomness from a
// caller-seedable RNG so runs can be made bit-reproducible.

pub mod holt_winters;
pub mod knn;
pub mod monte_carlo;
pub mod patterns;
