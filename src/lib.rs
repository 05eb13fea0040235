//! fastloop: single-pass momentum trader for Polymarket crypto up/down markets
//!
//! Each invocation runs one decision cycle:
//! - Market discovery via the Gamma API, with ET deadline parsing
//! - Momentum from Binance candles or CoinGecko spot prices
//! - Threshold gates on momentum and volume confidence
//! - Dry-run or live execution through the Simmer API

pub mod asset;
pub mod cli;
pub mod config;
pub mod decision;
pub mod execution;
pub mod fetch;
pub mod market;
pub mod momentum;
pub mod telemetry;

#[cfg(test)]
mod testing;
