//! Momentum providers against persisted state

use crate::support::CannedTransport;
use fastloop::momentum::{
    JsonFileStore, MomentumDirection, PriceStore, SignalProvider, SpotPriceProvider,
};
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn test_spot_state_survives_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trading_state.json");

    // Each run builds a fresh provider over the same file
    let first = SpotPriceProvider::new(
        "http://cg.test",
        CannedTransport::new(vec![json!({"ethereum": {"usd": 3000}})]).fetcher(),
        JsonFileStore::new(&path),
    );
    let seeded = first.momentum("ETH").await.unwrap();
    assert_eq!(seeded.direction, MomentumDirection::Neutral);

    let second = SpotPriceProvider::new(
        "http://cg.test",
        CannedTransport::new(vec![json!({"ethereum": {"usd": 2970}})]).fetcher(),
        JsonFileStore::new(&path),
    );
    let moved = second.momentum("ETH").await.unwrap();
    assert_eq!(moved.momentum_pct, dec!(-1));
    assert_eq!(moved.direction, MomentumDirection::Down);
    assert_eq!(moved.volume_ratio, dec!(1));

    let third = SpotPriceProvider::new(
        "http://cg.test",
        CannedTransport::new(vec![json!({"ethereum": {"usd": 2970}})]).fetcher(),
        JsonFileStore::new(&path),
    );
    let flat = third.momentum("ETH").await.unwrap();
    assert!(flat.momentum_pct.is_zero());

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["ETH_last_price"], 2970.0);
}

#[tokio::test]
async fn test_spot_failure_leaves_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));
    store.set_last_price("BTC", dec!(60000)).unwrap();

    let provider = SpotPriceProvider::new(
        "http://cg.test",
        CannedTransport::new(vec![]).fetcher(),
        store,
    );

    assert!(provider.momentum("BTC").await.is_none());
    assert_eq!(provider.store().last_price("BTC").unwrap(), Some(dec!(60000)));
}
