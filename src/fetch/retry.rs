//! Retry loop and typed fetcher

use super::{FetchError, FetchRequest, RetryPolicy, Transport};
use crate::telemetry::{record_fetch_attempt, record_latency, FetchOutcome, LatencyMetric};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::sleep;

/// Perform `request` through `transport`, retrying per `policy`
///
/// Any failure (transport or non-success status) is retried after
/// `attempt * backoff_unit`. No delay follows the final attempt. When the
/// budget is spent the last failure is wrapped in [`FetchError::Exhausted`].
pub async fn fetch_with_retry(
    transport: &dyn Transport,
    request: &FetchRequest,
    policy: &RetryPolicy,
) -> Result<Value, FetchError> {
    let attempts = policy.attempts();
    let mut last_error = None;

    for attempt in 1..=attempts {
        let started = Instant::now();
        match transport.execute(request).await {
            Ok(value) => {
                record_latency(LatencyMetric::Fetch, started.elapsed());
                record_fetch_attempt(FetchOutcome::Success);
                return Ok(value);
            }
            Err(e) => {
                record_fetch_attempt(FetchOutcome::Failure);
                tracing::warn!(
                    url = %request.url,
                    attempt,
                    max_attempts = attempts,
                    error = %e,
                    "Upstream request failed"
                );
                if attempt < attempts {
                    sleep(policy.backoff_for(attempt)).await;
                }
                last_error = Some(e);
            }
        }
    }

    record_fetch_attempt(FetchOutcome::Exhausted);
    Err(FetchError::Exhausted {
        attempts,
        last: Box::new(
            last_error.unwrap_or_else(|| FetchError::Transport("no attempt made".to_string())),
        ),
    })
}

/// Transport plus retry policy, shared by every upstream client
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl Fetcher {
    /// Create a fetcher over the given transport
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Same transport, one attempt per request
    pub fn single_attempt(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            policy: RetryPolicy {
                max_attempts: 1,
                ..self.policy
            },
        }
    }

    /// Fetch a raw JSON payload
    pub async fn fetch(&self, request: &FetchRequest) -> Result<Value, FetchError> {
        fetch_with_retry(self.transport.as_ref(), request, &self.policy).await
    }

    /// Fetch and decode into `T`
    ///
    /// Decoding happens once, after a successful attempt; shape errors are
    /// not retried.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        request: &FetchRequest,
    ) -> Result<T, FetchError> {
        let value = self.fetch(request).await?;
        serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
