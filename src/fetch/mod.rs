//! Reliable fetch
//!
//! Every upstream call goes through [`fetch_with_retry`]: bounded attempts,
//! linear backoff, and a typed [`FetchError`] instead of a panic or an
//! untyped error when the budget runs out.

mod http;
mod retry;
mod types;

pub use http::HttpTransport;
pub use retry::{fetch_with_retry, Fetcher};
pub use types::{FetchError, FetchRequest, Method, RetryPolicy};

use async_trait::async_trait;
use serde_json::Value;

/// Performs a single attempt of a request
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request once, returning the decoded JSON body
    async fn execute(&self, request: &FetchRequest) -> Result<Value, FetchError>;
}
