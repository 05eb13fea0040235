//! Configuration loading

use fastloop::config::{Config, SignalSource};
use rust_decimal_macros::dec;

#[test]
fn test_config_example_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).unwrap();

    assert_eq!(config.asset, "BTC");
    assert_eq!(config.window, "5m");
    assert_eq!(config.min_momentum_pct, dec!(0.5));
    assert_eq!(config.signal_source(), SignalSource::Binance);
    assert_eq!(config.endpoints.gamma, "https://gamma-api.polymarket.com");
}

#[test]
fn test_json_config_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"asset": "SOL", "signal_source": "coingecko", "max_position": 2.5}"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.asset, "SOL");
    assert_eq!(config.signal_source(), SignalSource::CoinGecko);
    assert_eq!(config.max_position, dec!(2.5));
    assert_eq!(config.lookback_minutes, 5);
}

#[test]
fn test_resolved_config_prints_as_toml() {
    let rendered = toml::to_string_pretty(&Config::default()).unwrap();
    let reparsed: Config = toml::from_str(&rendered).unwrap();

    assert_eq!(reparsed.asset, "BTC");
    assert_eq!(reparsed.max_position, dec!(5.0));
    assert_eq!(reparsed.fetch.max_retries, 3);
}
