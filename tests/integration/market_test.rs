//! Market discovery and deadline parsing

use crate::support::CannedTransport;
use chrono::{TimeZone, Utc};
use fastloop::asset::AssetProfile;
use fastloop::market::{matches_market, parse_deadline, GammaClient, MarketSource};
use rust_decimal_macros::dec;
use serde_json::json;

#[test]
fn test_deadline_across_spring_forward() {
    // EST the day before, EDT the day after
    let before = parse_deadline("Bitcoin Up or Down - March 8, 9:55AM-10:00AM ET", 2025);
    let after = parse_deadline("Bitcoin Up or Down - March 10, 9:55AM-10:00AM ET", 2025);

    assert_eq!(before, Some(Utc.with_ymd_and_hms(2025, 3, 8, 15, 0, 0).unwrap()));
    assert_eq!(after, Some(Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0).unwrap()));
}

#[test]
fn test_deadline_across_fall_back() {
    let before = parse_deadline("Solana Up or Down - November 1, 3:55PM-4:00PM ET", 2025);
    let after = parse_deadline("Solana Up or Down - November 3, 3:55PM-4:00PM ET", 2025);

    assert_eq!(before, Some(Utc.with_ymd_and_hms(2025, 11, 1, 20, 0, 0).unwrap()));
    assert_eq!(after, Some(Utc.with_ymd_and_hms(2025, 11, 3, 21, 0, 0).unwrap()));
}

#[test]
fn test_filter_depends_only_on_question_and_slug() {
    let eth = AssetProfile::for_symbol("ETH");
    let q = "Ethereum Up or Down - June 2, 10:00AM-10:15AM ET";

    assert!(matches_market(q, "eth-updown-15m-1748872800", eth.question_patterns, "15m"));
    assert!(!matches_market(q, "eth-updown-15m-1748872800", eth.question_patterns, "5m"));
    assert!(!matches_market(q, "eth-updown-1h-1748872800", eth.question_patterns, "15m"));
}

#[tokio::test]
async fn test_gamma_discovery_end_to_end() {
    let transport = CannedTransport::new(vec![json!([
        {
            "question": "Solana Up or Down - June 2, 10:00AM-10:05AM ET",
            "slug": "sol-updown-5m-1748872800",
            "conditionId": "0xsol",
            "outcomePrices": "[\"0.61\", \"0.39\"]",
            "feeRateBps": "25"
        },
        {
            "question": "Solana Up or Down - June 2, 10:05AM-10:10AM ET",
            "slug": "sol-updown-5m-1748873100",
            "outcomePrices": "garbage"
        },
        {
            "question": "Solana price above $200 on June 2?",
            "slug": "sol-above-200-5m-x"
        }
    ])]);
    let client = GammaClient::new("http://gamma.test", transport.fetcher());

    let markets = client.discover("SOL", "5m").await.unwrap();

    assert_eq!(markets.len(), 2);
    assert_eq!(markets[0].condition_id.as_deref(), Some("0xsol"));
    assert_eq!(markets[0].outcome_prices, (dec!(0.61), dec!(0.39)));
    assert_eq!(markets[0].fee_rate_bps, 25);
    assert_eq!(markets[1].outcome_prices, (dec!(0.5), dec!(0.5)));
    assert!(markets[0].deadline < markets[1].deadline);
}
