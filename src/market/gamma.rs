//! Gamma API client for market discovery
//!
//! Lists the newest open crypto markets and keeps the ones whose question names
//! the asset's up/down series and whose slug carries the requested window.
//! The slug check matters: the same asset runs 5m, 15m and hourly series with
//! near-identical questions.

use super::{deadline::parse_deadline_now, MarketCandidate, MarketSource};
use crate::asset::AssetProfile;
use crate::fetch::{FetchError, FetchRequest, Fetcher};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// Gamma API base URL
pub const GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";

/// Size of the listing page scanned per cycle
const PAGE_LIMIT: u32 = 20;

/// Client for Polymarket's Gamma API
pub struct GammaClient {
    base_url: String,
    fetcher: Fetcher,
}

impl GammaClient {
    /// Create a client against the given base URL
    pub fn new(base_url: impl Into<String>, fetcher: Fetcher) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fetcher,
        }
    }

    fn listing_request(&self) -> FetchRequest {
        FetchRequest::get(format!("{}/markets", self.base_url))
            .query("limit", PAGE_LIMIT)
            .query("closed", "false")
            .query("tag", "crypto")
            .query("order", "createdAt")
            .query("ascending", "false")
    }

    /// Convert a raw listing record into a candidate, if it qualifies
    fn convert_to_candidate(
        record: Value,
        profile: &AssetProfile,
        window: &str,
    ) -> Option<MarketCandidate> {
        let gamma: GammaMarket = match serde_json::from_value(record) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable market record");
                return None;
            }
        };

        let question = gamma.question.unwrap_or_default();
        let slug = gamma.slug.unwrap_or_default();

        if !matches_market(&question, &slug, profile.question_patterns, window) {
            return None;
        }

        let Some(deadline) = parse_deadline_now(&question) else {
            tracing::debug!(slug = %slug, "No deadline in question, excluding market");
            return None;
        };

        Some(MarketCandidate {
            question,
            slug,
            condition_id: gamma.condition_id,
            deadline,
            outcome_prices: parse_outcome_prices(gamma.outcome_prices.as_ref()),
            fee_rate_bps: parse_fee_rate(gamma.fee_rate_bps.as_ref()),
        })
    }
}

#[async_trait]
impl MarketSource for GammaClient {
    async fn discover(
        &self,
        asset: &str,
        window: &str,
    ) -> Result<Vec<MarketCandidate>, FetchError> {
        let profile = AssetProfile::for_symbol(asset);
        let request = self.listing_request();

        tracing::debug!(url = %request.url, asset, window, "Fetching market listing");

        let payload = self.fetcher.fetch(&request).await?;
        let Value::Array(records) = payload else {
            tracing::warn!("Gamma listing was not an array, treating as empty");
            return Ok(vec![]);
        };

        let scanned = records.len();
        let candidates: Vec<MarketCandidate> = records
            .into_iter()
            .filter_map(|record| Self::convert_to_candidate(record, &profile, window))
            .collect();

        tracing::info!(
            scanned,
            matched = candidates.len(),
            asset,
            window,
            "Market discovery complete"
        );

        Ok(candidates)
    }
}

/// Raw market record from the Gamma API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GammaMarket {
    question: Option<String>,
    slug: Option<String>,
    condition_id: Option<String>,
    /// JSON-encoded pair, usually `"[\"0.52\", \"0.48\"]"`
    outcome_prices: Option<Value>,
    /// Number or numeric string
    fee_rate_bps: Option<Value>,
}

/// Whether a listing record belongs to the asset's series on this window
///
/// Depends only on the question and slug: the lower-cased question must
/// contain one of `patterns`, and the slug must contain `-{window}-`.
pub fn matches_market(question: &str, slug: &str, patterns: &[&str], window: &str) -> bool {
    let question = question.to_lowercase();
    let window_token = format!("-{}-", window);

    patterns.iter().any(|p| question.contains(p)) && slug.contains(&window_token)
}

/// Parse the (yes, no) outcome prices, defaulting to an even split
///
/// Accepts the JSON-encoded string the API returns or a plain array, with
/// string or numeric entries.
pub fn parse_outcome_prices(raw: Option<&Value>) -> (Decimal, Decimal) {
    let even = (Decimal::new(5, 1), Decimal::new(5, 1));

    let prices: Option<Vec<Decimal>> = match raw {
        Some(Value::String(s)) => serde_json::from_str(s).ok(),
        Some(v @ Value::Array(_)) => serde_json::from_value(v.clone()).ok(),
        _ => None,
    };

    match prices.as_deref() {
        Some([yes, no]) => (*yes, *no),
        _ => even,
    }
}

/// Fee rate in basis points; fractional numbers are truncated
fn parse_fee_rate(raw: Option<&Value>) -> u32 {
    match raw {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            })
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
