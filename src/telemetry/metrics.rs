//! Cycle and fetch metrics
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! host process installs a recorder.

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Single successful upstream attempt
    Fetch,
    /// Full decision cycle
    Cycle,
}

/// Result of a single fetch attempt
#[derive(Debug, Clone, Copy)]
pub enum FetchOutcome {
    Success,
    Failure,
    /// Retry budget spent
    Exhausted,
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::Fetch => "fastloop_fetch_latency_ms",
        LatencyMetric::Cycle => "fastloop_cycle_latency_ms",
    };

    metrics::histogram!(metric_name).record(duration.as_secs_f64() * 1000.0);
    tracing::trace!(
        metric = metric_name,
        value_ms = duration.as_millis(),
        "Recording latency"
    );
}

/// Count a fetch attempt by outcome
pub fn record_fetch_attempt(outcome: FetchOutcome) {
    let label = match outcome {
        FetchOutcome::Success => "success",
        FetchOutcome::Failure => "failure",
        FetchOutcome::Exhausted => "exhausted",
    };

    metrics::counter!("fastloop_fetch_attempts_total", "outcome" => label).increment(1);
}

/// Count a terminal cycle outcome
pub fn record_cycle_outcome(outcome: &'static str) {
    metrics::counter!("fastloop_cycle_outcomes_total", "outcome" => outcome).increment(1);
}
