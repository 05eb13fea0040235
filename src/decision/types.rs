//! Decision types

use crate::market::MarketCandidate;
use crate::momentum::MomentumSignal;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Trading side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy Yes tokens
    Yes,
    /// Buy No tokens
    No,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("yes"),
            Self::No => f.write_str("no"),
        }
    }
}

/// A directional trade recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Unique decision identifier
    pub id: Uuid,
    pub side: Side,
    pub asset: String,
    /// Slug of the targeted market
    pub market_slug: String,
    pub condition_id: Option<String>,
    /// Human-readable reason for the side
    pub rationale: String,
    pub created_at: DateTime<Utc>,
}

impl Decision {
    /// Create a decision for `market` backed by `signal`
    pub fn new(side: Side, asset: &str, market: &MarketCandidate, signal: &MomentumSignal) -> Self {
        let rationale = format!(
            "{} momentum of {:.3}% with {:.2}x volume",
            signal.direction, signal.momentum_pct, signal.volume_ratio
        );

        Self {
            id: Uuid::new_v4(),
            side,
            asset: asset.to_string(),
            market_slug: market.slug.clone(),
            condition_id: market.condition_id.clone(),
            rationale,
            created_at: Utc::now(),
        }
    }
}

/// Why a cycle ended without a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No market settles far enough in the future
    NoSuitableMarkets,
    /// The momentum provider produced nothing
    NoSignal,
    /// |momentum| below the configured minimum
    MomentumTooWeak { momentum_pct: Decimal, min: Decimal },
    /// Volume ratio below the confidence floor
    VolumeTooLow { volume_ratio: Decimal, floor: Decimal },
}

impl SkipReason {
    /// Short label for metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoSuitableMarkets => "no_markets",
            Self::NoSignal => "no_signal",
            Self::MomentumTooWeak { .. } => "weak_momentum",
            Self::VolumeTooLow { .. } => "low_volume",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuitableMarkets => write!(f, "no suitable markets"),
            Self::NoSignal => write!(f, "failed to get signal"),
            Self::MomentumTooWeak { momentum_pct, min } => {
                write!(f, "momentum too weak ({:.3}% vs {}% minimum)", momentum_pct, min)
            }
            Self::VolumeTooLow {
                volume_ratio,
                floor,
            } => write!(f, "volume too low ({:.2}x vs {}x floor)", volume_ratio, floor),
        }
    }
}

/// Terminal result of one decision cycle
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// All gates passed
    Trade {
        market: MarketCandidate,
        signal: MomentumSignal,
        decision: Decision,
    },
    /// Cycle ended early
    Skip(SkipReason),
}

impl CycleOutcome {
    /// Short label for metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Trade { .. } => "trade",
            Self::Skip(reason) => reason.label(),
        }
    }

    /// The decision, if the cycle reached one
    pub fn decision(&self) -> Option<&Decision> {
        match self {
            Self::Trade { decision, .. } => Some(decision),
            Self::Skip(_) => None,
        }
    }
}
