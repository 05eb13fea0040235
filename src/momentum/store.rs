//! Last-price memory for the spot-price provider
//!
//! State lives in a flat JSON object keyed `{ASSET}_last_price`. Unknown keys
//! in the file are preserved on write.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Price store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("state file {path} is not a JSON object: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("price {0} cannot be stored")]
    Unrepresentable(Decimal),
}

/// Get/set access to the last observed spot price per asset
pub trait PriceStore: Send + Sync {
    /// Last stored price for `asset`, if any
    fn last_price(&self, asset: &str) -> Result<Option<Decimal>, StoreError>;

    /// Overwrite the stored price for `asset`
    fn set_last_price(&self, asset: &str, price: Decimal) -> Result<(), StoreError>;
}

/// State key for an asset
pub fn price_key(asset: &str) -> String {
    format!("{}_last_price", asset)
}

/// Price store backed by a JSON file
///
/// A missing file is empty state. Writes go to a sibling temp file and are
/// renamed into place so a crash never leaves a truncated file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_state(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                reason: format!("found {}", json_kind(&other)),
            }),
            Err(e) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            }),
        }
    }

    fn write_state(&self, state: &Map<String, Value>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let content = serde_json::to_string(state).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, content).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl PriceStore for JsonFileStore {
    fn last_price(&self, asset: &str) -> Result<Option<Decimal>, StoreError> {
        let state = self.read_state()?;
        let price = state.get(&price_key(asset)).and_then(|v| match v {
            Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
            Value::String(s) => s.parse::<Decimal>().ok(),
            _ => None,
        });
        Ok(price)
    }

    fn set_last_price(&self, asset: &str, price: Decimal) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every future run
        let mut state = match self.read_state() {
            Ok(state) => state,
            Err(StoreError::Corrupt { reason, .. }) => {
                tracing::warn!(path = %self.path.display(), reason = %reason, "Replacing corrupt state file");
                Map::new()
            }
            Err(e) => return Err(e),
        };

        let number = price
            .to_f64()
            .and_then(Number::from_f64)
            .ok_or(StoreError::Unrepresentable(price))?;
        state.insert(price_key(asset), Value::Number(number));

        self.write_state(&state)
    }
}

/// In-memory price store
#[derive(Debug, Default)]
pub struct MemoryPriceStore {
    prices: Mutex<HashMap<String, Decimal>>,
}

impl MemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PriceStore for MemoryPriceStore {
    fn last_price(&self, asset: &str) -> Result<Option<Decimal>, StoreError> {
        let prices = self.prices.lock().unwrap_or_else(|e| e.into_inner());
        Ok(prices.get(&price_key(asset)).copied())
    }

    fn set_last_price(&self, asset: &str, price: Decimal) -> Result<(), StoreError> {
        let mut prices = self.prices.lock().unwrap_or_else(|e| e.into_inner());
        prices.insert(price_key(asset), price);
        Ok(())
    }
}
