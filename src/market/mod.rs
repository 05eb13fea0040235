//! Market discovery module
//!
//! Finds open up/down markets for one asset and settlement window via the
//! Gamma API, with their settlement deadline and current odds attached.

mod deadline;
mod gamma;

pub use deadline::{parse_deadline, parse_deadline_now};
pub use gamma::{matches_market, parse_outcome_prices, GammaClient, GAMMA_API_URL};

use crate::fetch::FetchError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tradeable up/down market found during discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCandidate {
    /// Market question as listed
    pub question: String,
    /// URL slug, carries the window token (e.g. "-5m-")
    pub slug: String,
    /// Unique condition identifier
    pub condition_id: Option<String>,
    /// Settlement instant
    pub deadline: DateTime<Utc>,
    /// (yes, no) prices
    pub outcome_prices: (Decimal, Decimal),
    /// Taker fee in basis points
    pub fee_rate_bps: u32,
}

impl MarketCandidate {
    /// Price of the yes outcome
    pub fn yes_price(&self) -> Decimal {
        self.outcome_prices.0
    }

    /// Time left until settlement
    pub fn time_remaining(&self, now: DateTime<Utc>) -> chrono::Duration {
        self.deadline - now
    }
}

/// Source of candidate markets
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Markets for `asset` settling on the `window` cadence, in listing order
    async fn discover(&self, asset: &str, window: &str)
        -> Result<Vec<MarketCandidate>, FetchError>;
}
