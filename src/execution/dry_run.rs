//! Dry-run execution engine

use super::{ExecutionEngine, OrderReceipt, TradeOrder};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Logs orders instead of sending them
#[derive(Default)]
pub struct DryRunEngine {
    orders: Arc<RwLock<Vec<TradeOrder>>>,
}

impl DryRunEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders seen so far
    pub async fn orders(&self) -> Vec<TradeOrder> {
        self.orders.read().await.clone()
    }
}

#[async_trait]
impl ExecutionEngine for DryRunEngine {
    async fn submit(&self, order: TradeOrder) -> anyhow::Result<OrderReceipt> {
        tracing::info!(
            order_id = %order.id,
            market = %order.market_id(),
            side = %order.side,
            amount = %order.amount,
            "[DRY RUN] No trade executed"
        );

        let receipt = OrderReceipt {
            order_id: order.id,
            dry_run: true,
            response: None,
            submitted_at: Utc::now(),
        };
        self.orders.write().await.push(order);

        Ok(receipt)
    }
}
