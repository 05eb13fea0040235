//! Decision engine
//!
//! One cycle: discover markets, pick the nearest valid deadline, read a
//! momentum signal, gate it, and produce a decision or a skip. Each step is
//! a hard gate; nothing later runs once a step skips.

use super::filter::{evaluate, FilterResult, GateConfig};
use super::{CycleOutcome, Decision, SkipReason};
use crate::config::Config;
use crate::market::{MarketCandidate, MarketSource};
use crate::momentum::SignalProvider;
use crate::telemetry::{record_cycle_outcome, record_latency, LatencyMetric};
use chrono::{DateTime, Duration, Utc};
use std::time::Instant;

/// Engine settings
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub asset: String,
    pub window: String,
    /// Markets settling within this span are skipped
    pub min_time_remaining: Duration,
    pub gates: GateConfig,
}

impl EngineSettings {
    /// Settings taken from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            asset: config.asset.clone(),
            window: config.window.clone(),
            min_time_remaining: min_time_remaining(config.min_time_remaining),
            gates: GateConfig {
                min_momentum_pct: config.min_momentum_pct,
                volume_confidence: config.volume_confidence,
            },
        }
    }
}

/// Configured seconds as a duration; out-of-range values use the default
fn min_time_remaining(secs: i64) -> Duration {
    Duration::try_seconds(secs).unwrap_or_else(|| {
        let fallback = Config::default().min_time_remaining;
        tracing::warn!(
            min_time_remaining = secs,
            default = fallback,
            "min_time_remaining out of range, using default"
        );
        Duration::seconds(fallback)
    })
}

/// Nearest-settling market with more than `min_remaining` left
///
/// Ties keep discovery order.
pub fn select_market(
    candidates: &[MarketCandidate],
    now: DateTime<Utc>,
    min_remaining: Duration,
) -> Option<&MarketCandidate> {
    candidates
        .iter()
        .filter(|m| m.time_remaining(now) > min_remaining)
        .min_by_key(|m| m.deadline)
}

/// Runs decision cycles against a market source and a signal provider
pub struct DecisionEngine {
    settings: EngineSettings,
    markets: Box<dyn MarketSource>,
    signals: Box<dyn SignalProvider>,
}

impl DecisionEngine {
    pub fn new(
        settings: EngineSettings,
        markets: Box<dyn MarketSource>,
        signals: Box<dyn SignalProvider>,
    ) -> Self {
        Self {
            settings,
            markets,
            signals,
        }
    }

    /// Run one cycle as of `now`
    pub async fn run_cycle(&self, now: DateTime<Utc>) -> CycleOutcome {
        let started = Instant::now();
        let outcome = self.decide(now).await;

        record_latency(LatencyMetric::Cycle, started.elapsed());
        record_cycle_outcome(outcome.label());

        outcome
    }

    async fn decide(&self, now: DateTime<Utc>) -> CycleOutcome {
        let asset = self.settings.asset.as_str();

        let candidates = match self.markets.discover(asset, &self.settings.window).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(error = %e, "Market discovery failed");
                Vec::new()
            }
        };

        let Some(market) = select_market(&candidates, now, self.settings.min_time_remaining)
        else {
            tracing::info!(
                discovered = candidates.len(),
                min_time_remaining_secs = self.settings.min_time_remaining.num_seconds(),
                "No suitable markets"
            );
            return CycleOutcome::Skip(SkipReason::NoSuitableMarkets);
        };

        tracing::info!(
            question = %market.question,
            slug = %market.slug,
            deadline = %market.deadline,
            yes_price = %market.yes_price(),
            "Target market selected"
        );

        let Some(signal) = self.signals.momentum(asset).await else {
            tracing::info!(asset, "Failed to get price signal");
            return CycleOutcome::Skip(SkipReason::NoSignal);
        };

        tracing::info!(
            direction = %signal.direction,
            momentum_pct = %signal.momentum_pct.round_dp(3),
            volume_ratio = %signal.volume_ratio.round_dp(2),
            price = %signal.current_price,
            "Momentum signal"
        );

        match evaluate(&signal, &self.settings.gates) {
            FilterResult::Reject(reason) => {
                tracing::info!(reason = %reason, "Skipping");
                CycleOutcome::Skip(reason)
            }
            FilterResult::Pass(side) => {
                let decision = Decision::new(side, asset, market, &signal);
                tracing::info!(
                    decision_id = %decision.id,
                    side = %decision.side,
                    rationale = %decision.rationale,
                    "Trade signal"
                );
                CycleOutcome::Trade {
                    market: market.clone(),
                    signal,
                    decision,
                }
            }
        }
    }
}
