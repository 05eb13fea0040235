//! Configuration types for fastloop
//!
//! Every key has a serde default, so a partial (or empty) file always
//! resolves to a complete, typed configuration. Keys are resolved one at a
//! time: a key with an unusable value falls back to its default without
//! affecting the others.

use crate::execution::SIMMER_API_URL;
use crate::fetch::RetryPolicy;
use crate::market::GAMMA_API_URL;
use crate::momentum::{BINANCE_API_URL, COINGECKO_API_URL};
use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the trading API key
pub const API_KEY_ENV: &str = "SIMMER_API_KEY";

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),

    #[error("could not resolve configuration: {0}")]
    Resolve(serde_json::Error),
}

/// A key that fell back to its default
#[derive(Debug, Clone, PartialEq)]
pub struct KeyFallback {
    /// Dotted key, e.g. `fetch.max_retries`
    pub key: String,
    pub reason: String,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minimum odds edge required before entering (carried for the trading API)
    #[serde(default = "default_entry_threshold")]
    pub entry_threshold: Decimal,

    /// Minimum absolute momentum, in percent, to act on
    #[serde(default = "default_min_momentum_pct")]
    pub min_momentum_pct: Decimal,

    /// Order amount in USD
    #[serde(default = "default_max_position")]
    pub max_position: Decimal,

    /// "binance" for exchange candles, anything else for spot prices
    #[serde(default = "default_signal_source")]
    pub signal_source: String,

    /// Number of one-minute candles in the momentum window
    #[serde(default = "default_lookback_minutes")]
    pub lookback_minutes: u32,

    /// Markets settling sooner than this many seconds are ignored
    #[serde(default = "default_min_time_remaining")]
    pub min_time_remaining: i64,

    #[serde(default = "default_asset")]
    pub asset: String,

    /// Settlement cadence token matched against market slugs
    #[serde(default = "default_window")]
    pub window: String,

    /// Require a minimum volume ratio before acting
    #[serde(default = "default_true")]
    pub volume_confidence: bool,

    /// Spot-price memory file
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub endpoints: EndpointConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Which momentum provider feeds the decision engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalSource {
    /// One-minute exchange candles
    Binance,
    /// Spot price compared against the previous run
    CoinGecko,
}

/// Retry and timeout settings for upstream calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_backoff_unit_ms")]
    pub backoff_unit_ms: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Upstream base URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_gamma_url")]
    pub gamma: String,

    #[serde(default = "default_binance_url")]
    pub binance: String,

    #[serde(default = "default_coingecko_url")]
    pub coingecko: String,

    #[serde(default = "default_simmer_url")]
    pub simmer: String,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_entry_threshold() -> Decimal {
    Decimal::new(5, 2) // 0.05
}
fn default_min_momentum_pct() -> Decimal {
    Decimal::new(5, 1) // 0.5%
}
fn default_max_position() -> Decimal {
    Decimal::new(50, 1) // $5.00
}
fn default_signal_source() -> String {
    "binance".to_string()
}
fn default_lookback_minutes() -> u32 {
    5
}
fn default_min_time_remaining() -> i64 {
    60
}
fn default_asset() -> String {
    "BTC".to_string()
}
fn default_window() -> String {
    "5m".to_string()
}
fn default_true() -> bool {
    true
}
fn default_state_file() -> PathBuf {
    PathBuf::from("trading_state.json")
}
fn default_max_retries() -> u32 {
    3
}
fn default_backoff_unit_ms() -> u64 {
    1000
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_gamma_url() -> String {
    GAMMA_API_URL.to_string()
}
fn default_binance_url() -> String {
    BINANCE_API_URL.to_string()
}
fn default_coingecko_url() -> String {
    COINGECKO_API_URL.to_string()
}
fn default_simmer_url() -> String {
    SIMMER_API_URL.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entry_threshold: default_entry_threshold(),
            min_momentum_pct: default_min_momentum_pct(),
            max_position: default_max_position(),
            signal_source: default_signal_source(),
            lookback_minutes: default_lookback_minutes(),
            min_time_remaining: default_min_time_remaining(),
            asset: default_asset(),
            window: default_window(),
            volume_confidence: true,
            state_file: default_state_file(),
            fetch: FetchConfig::default(),
            endpoints: EndpointConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            backoff_unit_ms: default_backoff_unit_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            gamma: default_gamma_url(),
            binance: default_binance_url(),
            coingecko: default_coingecko_url(),
            simmer: default_simmer_url(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl FetchConfig {
    /// Retry policy derived from these settings
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_retries,
            backoff_unit: Duration::from_millis(self.backoff_unit_ms),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, or JSON when the extension is `.json`
    ///
    /// Keys that fall back to their default are reported on stderr, since
    /// this runs before logging is set up.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let raw: Map<String, Value> = if is_json {
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            let table: toml::Table =
                toml::from_str(&content).map_err(|source| ConfigError::Toml {
                    path: path.to_path_buf(),
                    source,
                })?;
            match serde_json::to_value(table).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })? {
                Value::Object(map) => map,
                _ => Map::new(),
            }
        };

        let (config, fallbacks) = Self::resolve(raw)?;
        for fallback in &fallbacks {
            eprintln!(
                "Warning: invalid `{}` in {} ({}), using default",
                fallback.key,
                path.display(),
                fallback.reason
            );
        }

        Ok(config)
    }

    /// Resolve raw key/value pairs over the defaults, one key at a time
    ///
    /// Keys inside a known section (`[fetch]`, `[endpoints]`, `[telemetry]`)
    /// are resolved individually too. Unknown keys are ignored.
    pub fn resolve(raw: Map<String, Value>) -> Result<(Self, Vec<KeyFallback>), ConfigError> {
        let defaults = serde_json::to_value(Self::default()).map_err(ConfigError::Resolve)?;
        let mut resolved = match defaults {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let mut fallbacks = Vec::new();

        for (key, value) in raw {
            let is_section = matches!(resolved.get(&key), Some(Value::Object(_)));
            match value {
                Value::Object(section) if is_section => {
                    for (field, value) in section {
                        let mut candidate = resolved.clone();
                        if let Some(Value::Object(table)) = candidate.get_mut(&key) {
                            table.insert(field.clone(), value);
                        }
                        accept_key(
                            &mut resolved,
                            candidate,
                            format!("{}.{}", key, field),
                            &mut fallbacks,
                        );
                    }
                }
                value => {
                    let mut candidate = resolved.clone();
                    candidate.insert(key.clone(), value);
                    accept_key(&mut resolved, candidate, key, &mut fallbacks);
                }
            }
        }

        let config =
            serde_json::from_value(Value::Object(resolved)).map_err(ConfigError::Resolve)?;
        Ok((config, fallbacks))
    }

    /// Load configuration, falling back to defaults when the file is absent or invalid
    ///
    /// Runs before logging is set up, so problems go to stderr.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(e) => {
                eprintln!("Warning: {}", e);
                eprintln!("Using default configuration");
                Self::default()
            }
        }
    }

    /// Momentum provider selected by `signal_source`
    pub fn signal_source(&self) -> SignalSource {
        if self.signal_source.eq_ignore_ascii_case("binance") {
            SignalSource::Binance
        } else {
            SignalSource::CoinGecko
        }
    }
}

/// Keep `candidate` if it still deserializes, otherwise record the fallback
fn accept_key(
    resolved: &mut Map<String, Value>,
    candidate: Map<String, Value>,
    key: String,
    fallbacks: &mut Vec<KeyFallback>,
) {
    match serde_json::from_value::<Config>(Value::Object(candidate.clone())) {
        Ok(_) => *resolved = candidate,
        Err(e) => fallbacks.push(KeyFallback {
            key,
            reason: e.to_string(),
        }),
    }
}

/// Read the trading API key from the environment
///
/// A `.env` file in the working directory is honoured.
pub fn load_api_key() -> Result<String, ConfigError> {
    dotenvy::dotenv().ok();
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingCredential(API_KEY_ENV)),
    }
}
