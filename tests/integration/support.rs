//! Shared test doubles

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fastloop::fetch::{FetchError, FetchRequest, Fetcher, RetryPolicy, Transport};
use fastloop::market::{MarketCandidate, MarketSource};
use fastloop::momentum::{MomentumSignal, SignalProvider};
use rust_decimal_macros::dec;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Market source returning a fixed listing
pub struct FixedMarkets(pub Vec<MarketCandidate>);

#[async_trait]
impl MarketSource for FixedMarkets {
    async fn discover(
        &self,
        _asset: &str,
        _window: &str,
    ) -> Result<Vec<MarketCandidate>, FetchError> {
        Ok(self.0.clone())
    }
}

/// Signal provider returning a fixed signal and counting calls
#[derive(Clone)]
pub struct FixedSignal {
    signal: Option<MomentumSignal>,
    calls: Arc<AtomicUsize>,
}

impl FixedSignal {
    pub fn new(signal: Option<MomentumSignal>) -> Self {
        Self {
            signal,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SignalProvider for FixedSignal {
    async fn momentum(&self, _asset: &str) -> Option<MomentumSignal> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.signal.clone()
    }
}

/// Transport replaying canned JSON payloads
#[derive(Clone, Default)]
pub struct CannedTransport {
    responses: Arc<Mutex<VecDeque<Value>>>,
}

impl CannedTransport {
    pub fn new(responses: Vec<Value>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
        }
    }

    pub fn fetcher(&self) -> Fetcher {
        Fetcher::new(
            Arc::new(self.clone()),
            RetryPolicy {
                max_attempts: 1,
                backoff_unit: Duration::ZERO,
                timeout: Duration::from_secs(1),
            },
        )
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn execute(&self, _request: &FetchRequest) -> Result<Value, FetchError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| FetchError::Transport("no canned response".to_string()))
    }
}

pub fn market(slug: &str, deadline: DateTime<Utc>) -> MarketCandidate {
    MarketCandidate {
        question: "Bitcoin Up or Down - June 2, 10:00AM-10:05AM ET".to_string(),
        slug: slug.to_string(),
        condition_id: Some(format!("0x{}", slug)),
        deadline,
        outcome_prices: (dec!(0.5), dec!(0.5)),
        fee_rate_bps: 0,
    }
}
