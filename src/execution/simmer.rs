//! Live execution through the Simmer trading API

use super::{ExecutionEngine, OrderReceipt, TradeOrder};
use crate::fetch::{FetchRequest, Fetcher};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use serde_json::json;

/// Simmer API base URL
pub const SIMMER_API_URL: &str = "https://api.simmer.markets";

/// Submits orders to the Simmer trade endpoint
///
/// Order POSTs are not idempotent, so each one is sent exactly once.
pub struct SimmerEngine {
    base_url: String,
    api_key: String,
    fetcher: Fetcher,
}

impl SimmerEngine {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, fetcher: Fetcher) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            fetcher: fetcher.single_attempt(),
        }
    }

    fn trade_request(&self, order: &TradeOrder) -> FetchRequest {
        FetchRequest::post(format!("{}/api/sdk/trade", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(json!({
                "market_id": order.market_id(),
                "side": order.side,
                "amount": order.amount.to_f64(),
                "asset": order.asset,
                "reason": order.reason,
            }))
    }
}

#[async_trait]
impl ExecutionEngine for SimmerEngine {
    async fn submit(&self, order: TradeOrder) -> anyhow::Result<OrderReceipt> {
        tracing::info!(
            order_id = %order.id,
            market = %order.market_id(),
            side = %order.side,
            amount = %order.amount,
            "Submitting live order"
        );

        let response = self.fetcher.fetch(&self.trade_request(&order)).await?;

        tracing::info!(order_id = %order.id, "Live order accepted");
        Ok(OrderReceipt {
            order_id: order.id,
            dry_run: false,
            response: Some(response),
            submitted_at: Utc::now(),
        })
    }
}
