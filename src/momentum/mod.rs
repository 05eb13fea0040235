//! Momentum signal providers
//!
//! Two interchangeable sources of short-horizon momentum: exchange candles
//! (with volume confidence) and spot prices compared across runs.

mod candles;
mod spot;
mod store;
mod types;

pub use candles::{momentum_from_candles, Candle, CandleProvider, BINANCE_API_URL};
pub use spot::{spot_momentum, SpotPriceProvider, COINGECKO_API_URL};
pub use store::{price_key, JsonFileStore, MemoryPriceStore, PriceStore, StoreError};
pub use types::{MomentumDirection, MomentumSignal};

use async_trait::async_trait;

/// Trait for momentum signal providers
#[async_trait]
pub trait SignalProvider: Send + Sync {
    /// Current momentum for `asset`, or `None` when no signal can be produced
    async fn momentum(&self, asset: &str) -> Option<MomentumSignal>;
}
