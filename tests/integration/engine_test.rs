//! Decision cycle scenarios

use crate::support::{market, FixedMarkets, FixedSignal};
use chrono::{Duration, Utc};
use fastloop::config::Config;
use fastloop::decision::{CycleOutcome, DecisionEngine, EngineSettings, Side, SkipReason};
use fastloop::execution::{DryRunEngine, ExecutionEngine, TradeOrder};
use fastloop::market::MarketCandidate;
use fastloop::momentum::{MomentumDirection, MomentumSignal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn engine(markets: Vec<MarketCandidate>, signal: FixedSignal) -> DecisionEngine {
    DecisionEngine::new(
        EngineSettings::from_config(&Config::default()),
        Box::new(FixedMarkets(markets)),
        Box::new(signal),
    )
}

fn signal(pct: Decimal, ratio: Decimal) -> MomentumSignal {
    let direction = if pct > Decimal::ZERO {
        MomentumDirection::Up
    } else {
        MomentumDirection::Down
    };
    MomentumSignal::new(pct, direction, dec!(64000), ratio)
}

#[tokio::test]
async fn test_strong_up_momentum_buys_yes() {
    let now = Utc::now();
    let provider = FixedSignal::new(Some(signal(dec!(1.2), dec!(0.8))));
    let engine = engine(
        vec![
            market("later", now + Duration::minutes(9)),
            market("sooner", now + Duration::minutes(4)),
        ],
        provider,
    );

    let outcome = engine.run_cycle(now).await;

    let CycleOutcome::Trade {
        market, decision, ..
    } = &outcome
    else {
        panic!("expected a trade, got {:?}", outcome);
    };
    assert_eq!(decision.side, Side::Yes);
    assert_eq!(decision.asset, "BTC");
    assert_eq!(market.slug, "sooner");
    assert_eq!(decision.condition_id.as_deref(), Some("0xsooner"));
}

#[tokio::test]
async fn test_weak_momentum_skips() {
    let now = Utc::now();
    let provider = FixedSignal::new(Some(signal(dec!(-0.3), dec!(1.0))));
    let engine = engine(vec![market("m", now + Duration::minutes(4))], provider);

    let outcome = engine.run_cycle(now).await;

    let CycleOutcome::Skip(reason) = &outcome else {
        panic!("expected a skip, got {:?}", outcome);
    };
    assert!(matches!(reason, SkipReason::MomentumTooWeak { .. }));
    assert!(reason.to_string().starts_with("momentum too weak"));
}

#[tokio::test]
async fn test_low_volume_skips() {
    let now = Utc::now();
    let provider = FixedSignal::new(Some(signal(dec!(2.0), dec!(0.3))));
    let engine = engine(vec![market("m", now + Duration::minutes(4))], provider);

    let outcome = engine.run_cycle(now).await;

    assert!(matches!(
        outcome,
        CycleOutcome::Skip(SkipReason::VolumeTooLow { .. })
    ));
}

#[tokio::test]
async fn test_no_suitable_market_never_fetches_signal() {
    let now = Utc::now();
    let provider = FixedSignal::new(Some(signal(dec!(2.0), dec!(1.0))));
    let engine = engine(
        vec![
            market("closing", now + Duration::seconds(30)),
            market("settled", now - Duration::minutes(2)),
        ],
        provider.clone(),
    );

    let outcome = engine.run_cycle(now).await;

    assert!(matches!(
        outcome,
        CycleOutcome::Skip(SkipReason::NoSuitableMarkets)
    ));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_missing_signal_skips() {
    let now = Utc::now();
    let provider = FixedSignal::new(None);
    let engine = engine(vec![market("m", now + Duration::minutes(4))], provider.clone());

    let outcome = engine.run_cycle(now).await;

    assert!(matches!(outcome, CycleOutcome::Skip(SkipReason::NoSignal)));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_dry_run_executes_trade_decision() {
    let now = Utc::now();
    let provider = FixedSignal::new(Some(signal(dec!(-1.0), dec!(1.5))));
    let engine = engine(vec![market("m", now + Duration::minutes(4))], provider);

    let outcome = engine.run_cycle(now).await;
    let decision = outcome.decision().expect("trade decision");
    assert_eq!(decision.side, Side::No);

    let executor = DryRunEngine::new();
    let receipt = executor
        .submit(TradeOrder::from_decision(decision, dec!(5.0)))
        .await
        .unwrap();

    assert!(receipt.dry_run);
    assert_eq!(receipt.order_id, decision.id);
    assert_eq!(executor.orders().await[0].amount, dec!(5.0));
}
