//! Exchange-candle momentum
//!
//! Momentum over the last `lookback` one-minute Binance klines, with the last
//! candle's volume relative to the window mean as a confidence proxy.

use super::{MomentumDirection, MomentumSignal, SignalProvider};
use crate::asset::AssetProfile;
use crate::fetch::{FetchRequest, Fetcher};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use std::str::FromStr;

/// Binance REST base URL
pub const BINANCE_API_URL: &str = "https://api.binance.com";

/// One OHLCV bar
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Open time, milliseconds since epoch
    pub open_time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Candle {
    /// Parse a kline row: `[openTime, "open", "high", "low", "close", "volume", ...]`
    pub fn from_kline(row: &[Value]) -> Option<Self> {
        if row.len() < 6 {
            return None;
        }

        Some(Self {
            open_time: row[0].as_i64()?,
            open: decimal_field(&row[1])?,
            high: decimal_field(&row[2])?,
            low: decimal_field(&row[3])?,
            close: decimal_field(&row[4])?,
            volume: decimal_field(&row[5])?,
        })
    }
}

fn decimal_field(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

/// Momentum from a candle window, oldest first
///
/// Needs at least two candles. Zero momentum counts as down; this provider
/// has no neutral state.
pub fn momentum_from_candles(candles: &[Candle]) -> Option<MomentumSignal> {
    if candles.len() < 2 {
        return None;
    }

    let first = candles.first()?;
    let last = candles.last()?;
    if first.open.is_zero() {
        return None;
    }

    let momentum_pct = (last.close - first.open) / first.open * dec!(100);

    let total_volume: Decimal = candles.iter().map(|c| c.volume).sum();
    let mean_volume = total_volume / Decimal::from(candles.len());
    let volume_ratio = if mean_volume > Decimal::ZERO {
        last.volume / mean_volume
    } else {
        Decimal::ONE
    };

    let direction = if momentum_pct > Decimal::ZERO {
        MomentumDirection::Up
    } else {
        MomentumDirection::Down
    };

    Some(MomentumSignal::new(
        momentum_pct,
        direction,
        last.close,
        volume_ratio,
    ))
}

/// Momentum provider backed by Binance klines
pub struct CandleProvider {
    base_url: String,
    fetcher: Fetcher,
    lookback_minutes: u32,
}

impl CandleProvider {
    /// Create a provider reading `lookback_minutes` one-minute candles
    pub fn new(base_url: impl Into<String>, fetcher: Fetcher, lookback_minutes: u32) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fetcher,
            lookback_minutes,
        }
    }

    fn klines_request(&self, pair: &str) -> FetchRequest {
        FetchRequest::get(format!("{}/api/v3/klines", self.base_url))
            .query("symbol", pair)
            .query("interval", "1m")
            .query("limit", self.lookback_minutes)
    }
}

#[async_trait]
impl SignalProvider for CandleProvider {
    async fn momentum(&self, asset: &str) -> Option<MomentumSignal> {
        let profile = AssetProfile::for_symbol(asset);
        let request = self.klines_request(profile.exchange_pair);

        let rows: Vec<Vec<Value>> = match self.fetcher.get_json(&request).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(pair = profile.exchange_pair, error = %e, "Failed to fetch candles");
                return None;
            }
        };

        let candles: Vec<Candle> = rows.iter().filter_map(|r| Candle::from_kline(r)).collect();
        if candles.len() != rows.len() {
            tracing::debug!(
                dropped = rows.len() - candles.len(),
                "Skipped malformed kline rows"
            );
        }

        let signal = momentum_from_candles(&candles);
        if signal.is_none() {
            tracing::warn!(candles = candles.len(), "Not enough candle data for momentum");
        }
        signal
    }
}
