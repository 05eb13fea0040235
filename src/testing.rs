//! Test doubles shared by unit tests

use crate::fetch::{FetchError, FetchRequest, Fetcher, RetryPolicy, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transport that replays canned responses in order and records requests
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<Value, FetchError>>>>,
    requests: Arc<Mutex<Vec<FetchRequest>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<Value, FetchError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of attempts made so far
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Fetcher over this transport with no backoff delay
    pub fn fetcher(&self) -> Fetcher {
        Fetcher::new(
            Arc::new(self.clone()),
            RetryPolicy {
                max_attempts: 3,
                backoff_unit: Duration::ZERO,
                timeout: Duration::from_secs(1),
            },
        )
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &FetchRequest) -> Result<Value, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("script exhausted".to_string())))
    }
}
