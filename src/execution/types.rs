//! Execution types

use crate::decision::{Decision, Side};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Order identifier, shared with the decision that produced it
pub type OrderId = Uuid;

/// An order to be submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeOrder {
    pub id: OrderId,
    pub asset: String,
    pub market_slug: String,
    pub condition_id: Option<String>,
    /// Trade side
    pub side: Side,
    /// Amount in USD
    pub amount: Decimal,
    pub reason: String,
}

impl TradeOrder {
    /// Order for `decision` sized at `amount`
    pub fn from_decision(decision: &Decision, amount: Decimal) -> Self {
        Self {
            id: decision.id,
            asset: decision.asset.clone(),
            market_slug: decision.market_slug.clone(),
            condition_id: decision.condition_id.clone(),
            side: decision.side,
            amount,
            reason: decision.rationale.clone(),
        }
    }

    /// Identifier the trading API knows the market by
    pub fn market_id(&self) -> &str {
        self.condition_id.as_deref().unwrap_or(&self.market_slug)
    }
}

/// Acknowledgement of a submitted order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    /// True when nothing was sent upstream
    pub dry_run: bool,
    /// Raw upstream response, live mode only
    pub response: Option<Value>,
    pub submitted_at: DateTime<Utc>,
}
