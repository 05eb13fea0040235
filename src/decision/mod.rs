//! Decision engine module
//!
//! Turns a market listing and a momentum signal into a yes/no decision or
//! an explicit skip

mod engine;
mod filter;
mod types;

pub use engine::{select_market, DecisionEngine, EngineSettings};
pub use filter::{evaluate, side_for, FilterResult, GateConfig, VOLUME_CONFIDENCE_FLOOR};
pub use types::{CycleOutcome, Decision, Side, SkipReason};
