//! Momentum signal types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the measured move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MomentumDirection {
    Up,
    Down,
    /// No change; only the spot-price provider reports this
    Neutral,
}

impl fmt::Display for MomentumDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// Price momentum over the lookback window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumSignal {
    /// Signed change in percent (e.g. 1.2 = +1.2%)
    pub momentum_pct: Decimal,

    pub direction: MomentumDirection,

    /// Latest observed price
    pub current_price: Decimal,

    /// Last-period volume over mean window volume; 1.0 when no volume data
    pub volume_ratio: Decimal,

    pub detected_at: DateTime<Utc>,
}

impl MomentumSignal {
    /// Create a new momentum signal
    pub fn new(
        momentum_pct: Decimal,
        direction: MomentumDirection,
        current_price: Decimal,
        volume_ratio: Decimal,
    ) -> Self {
        Self {
            momentum_pct,
            direction,
            current_price,
            volume_ratio,
            detected_at: Utc::now(),
        }
    }
}
