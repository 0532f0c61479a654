// =============================================================================
// Levels & Price-Target Synthesizer
// =============================================================================
//
// Turns the raw series plus indicator/model outputs into actionable price
// levels: Fibonacci retracements, clustered swing support/resistance, optimal
// entry/exit targets with reasoning, and the stop/take/risk-reward block.

pub mod dynamic;
pub mod fibonacci;
pub mod targets;
