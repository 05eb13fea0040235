//! Execution engine module
//!
//! Handles order submission (dry-run and live modes)

mod dry_run;
mod simmer;
mod types;

pub use dry_run::DryRunEngine;
pub use simmer::{SimmerEngine, SIMMER_API_URL};
pub use types::{OrderId, OrderReceipt, TradeOrder};

use async_trait::async_trait;

/// Trait for execution engine implementations
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    /// Submit an order
    async fn submit(&self, order: TradeOrder) -> anyhow::Result<OrderReceipt>;
}
