//! Decision gates
//!
//! Momentum strength first, then volume confidence. A signal that clears
//! both maps to a side: up is yes, down and neutral are no.

use super::{Side, SkipReason};
use crate::momentum::{MomentumDirection, MomentumSignal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Minimum volume ratio when volume confidence is enabled
pub const VOLUME_CONFIDENCE_FLOOR: Decimal = dec!(0.5);

/// Result of applying the gates to a signal
#[derive(Debug, Clone, PartialEq)]
pub enum FilterResult {
    /// Signal passed all gates
    Pass(Side),
    /// Signal rejected
    Reject(SkipReason),
}

/// Gate thresholds
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Minimum |momentum| in percent
    pub min_momentum_pct: Decimal,
    /// Enforce [`VOLUME_CONFIDENCE_FLOOR`]
    pub volume_confidence: bool,
}

/// Side taken for a momentum direction
pub fn side_for(direction: MomentumDirection) -> Side {
    match direction {
        MomentumDirection::Up => Side::Yes,
        MomentumDirection::Down | MomentumDirection::Neutral => Side::No,
    }
}

/// Apply the gates to a signal
pub fn evaluate(signal: &MomentumSignal, config: &GateConfig) -> FilterResult {
    if signal.momentum_pct.abs() < config.min_momentum_pct {
        return FilterResult::Reject(SkipReason::MomentumTooWeak {
            momentum_pct: signal.momentum_pct,
            min: config.min_momentum_pct,
        });
    }

    if config.volume_confidence && signal.volume_ratio < VOLUME_CONFIDENCE_FLOOR {
        return FilterResult::Reject(SkipReason::VolumeTooLow {
            volume_ratio: signal.volume_ratio,
            floor: VOLUME_CONFIDENCE_FLOOR,
        });
    }

    FilterResult::Pass(side_for(signal.direction))
}
