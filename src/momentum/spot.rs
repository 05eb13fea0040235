//! Spot-price momentum
//!
//! Compares the current CoinGecko spot price against the price remembered
//! from the previous run. There is no volume in this path, so the volume
//! ratio is always 1.0. Computing a signal records the current price, so two
//! back-to-back calls see zero momentum the second time.

use super::store::PriceStore;
use super::{MomentumDirection, MomentumSignal, SignalProvider};
use crate::asset::AssetProfile;
use crate::fetch::{FetchRequest, Fetcher};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// CoinGecko REST base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com";

/// Momentum between a remembered price and the current one
///
/// Equal prices (including a first run seeded with the current price) are
/// neutral.
pub fn spot_momentum(previous: Decimal, current: Decimal) -> MomentumSignal {
    let momentum_pct = if previous.is_zero() {
        Decimal::ZERO
    } else {
        (current - previous) / previous * dec!(100)
    };

    let direction = if momentum_pct > Decimal::ZERO {
        MomentumDirection::Up
    } else if momentum_pct < Decimal::ZERO {
        MomentumDirection::Down
    } else {
        MomentumDirection::Neutral
    };

    MomentumSignal::new(momentum_pct, direction, current, Decimal::ONE)
}

/// Momentum provider backed by spot prices and a price store
pub struct SpotPriceProvider<S: PriceStore> {
    base_url: String,
    fetcher: Fetcher,
    store: S,
}

impl<S: PriceStore> SpotPriceProvider<S> {
    pub fn new(base_url: impl Into<String>, fetcher: Fetcher, store: S) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fetcher,
            store,
        }
    }

    /// The backing price store
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn fetch_spot(&self, spot_id: &str) -> Option<Decimal> {
        let request = FetchRequest::get(format!("{}/api/v3/simple/price", self.base_url))
            .query("ids", spot_id)
            .query("vs_currencies", "usd");

        let quotes: HashMap<String, HashMap<String, Decimal>> =
            match self.fetcher.get_json(&request).await {
                Ok(quotes) => quotes,
                Err(e) => {
                    tracing::warn!(spot_id, error = %e, "Failed to fetch spot price");
                    return None;
                }
            };

        quotes
            .get(spot_id)
            .and_then(|q| q.get("usd"))
            .copied()
            .filter(|price| !price.is_zero())
    }
}

#[async_trait]
impl<S: PriceStore> SignalProvider for SpotPriceProvider<S> {
    async fn momentum(&self, asset: &str) -> Option<MomentumSignal> {
        let profile = AssetProfile::for_symbol(asset);
        let Some(current) = self.fetch_spot(profile.spot_id).await else {
            tracing::warn!(asset, "No spot price available");
            return None;
        };

        let previous = match self.store.last_price(asset) {
            Ok(previous) => previous,
            Err(e) => {
                tracing::warn!(asset, error = %e, "Could not read last price, seeding from current");
                None
            }
        };

        let signal = spot_momentum(previous.unwrap_or(current), current);

        if let Err(e) = self.store.set_last_price(asset, current) {
            tracing::warn!(asset, error = %e, "Could not persist last price");
        }

        Some(signal)
    }
}
