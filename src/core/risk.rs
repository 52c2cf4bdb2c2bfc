use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Direction, TradeResult};

pub const SAFETY_DANGER_PCT: f64 = 2.0;
pub const SAFETY_CAUTION_PCT: f64 = 5.0;

pub fn stop_price(direction: Direction, entry: f64, stop_risk: f64) -> f64 {
    match direction {
        Direction::Long => entry * (1.0 - stop_risk),
        Direction::Short => entry * (1.0 + stop_risk),
    }
}

/// Linear liquidation estimate. Ignores fees, funding and maintenance margin.
pub fn liquidation_price(direction: Direction, entry: f64, leverage: f64) -> f64 {
    let distance = 1.0 / leverage;
    match direction {
        Direction::Long => entry * (1.0 - distance),
        Direction::Short => entry * (1.0 + distance),
    }
}

/// Distance from entry to liquidation as a positive percentage of entry.
pub fn liquidation_distance_pct(entry: f64, liquidation: f64) -> f64 {
    if entry == 0.0 {
        return 0.0;
    }
    ((entry - liquidation) / entry).abs() * 100.0
}

/// Buffer between the stop and liquidation as a percentage of the stop price.
///
/// Positive while the stop triggers before liquidation, negative when
/// liquidation would be hit first.
pub fn safety_margin_pct(direction: Direction, stop: f64, liquidation: f64) -> f64 {
    if stop == 0.0 {
        return 0.0;
    }
    let gap = match direction {
        Direction::Long => stop - liquidation,
        Direction::Short => liquidation - stop,
    };
    gap / stop * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    Danger,
    Caution,
    Safe,
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyLevel::Danger => write!(f, "danger"),
            SafetyLevel::Caution => write!(f, "caution"),
            SafetyLevel::Safe => write!(f, "safe"),
        }
    }
}

impl SafetyLevel {
    pub fn classify(safety_margin_pct: f64) -> Self {
        if safety_margin_pct < SAFETY_DANGER_PCT {
            SafetyLevel::Danger
        } else if safety_margin_pct < SAFETY_CAUTION_PCT {
            SafetyLevel::Caution
        } else {
            SafetyLevel::Safe
        }
    }

    /// Reclassify from the formatted result string, the way display code does.
    /// An unparseable value is treated as the worst case.
    pub fn from_result(result: &TradeResult) -> Self {
        result
            .safety_margin_pct
            .parse::<f64>()
            .map(Self::classify)
            .unwrap_or(SafetyLevel::Danger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_stop_and_liquidation_below_entry() {
        let stop = stop_price(Direction::Long, 100.0, 0.05);
        let liq = liquidation_price(Direction::Long, 100.0, 10.0);
        assert!((stop - 95.0).abs() < 1e-9);
        assert!((liq - 90.0).abs() < 1e-9);
        assert!((liquidation_distance_pct(100.0, liq) - 10.0).abs() < 1e-9);
        // (95 - 90) / 95
        let safety = safety_margin_pct(Direction::Long, stop, liq);
        assert!((safety - 500.0 / 95.0).abs() < 1e-9);
    }

    #[test]
    fn short_mirrors_long() {
        let stop = stop_price(Direction::Short, 100.0, 0.05);
        let liq = liquidation_price(Direction::Short, 100.0, 10.0);
        assert!((stop - 105.0).abs() < 1e-9);
        assert!((liq - 110.0).abs() < 1e-9);
        assert!((liquidation_distance_pct(100.0, liq) - 10.0).abs() < 1e-9);
        assert!(safety_margin_pct(Direction::Short, stop, liq) > 0.0);
    }

    #[test]
    fn stop_beyond_liquidation_is_negative() {
        let stop = stop_price(Direction::Long, 100.0, 0.2);
        let liq = liquidation_price(Direction::Long, 100.0, 10.0);
        assert!(safety_margin_pct(Direction::Long, stop, liq) < 0.0);
    }

    #[test]
    fn classification_thresholds() {
        assert_eq!(SafetyLevel::classify(-3.0), SafetyLevel::Danger);
        assert_eq!(SafetyLevel::classify(1.99), SafetyLevel::Danger);
        assert_eq!(SafetyLevel::classify(2.0), SafetyLevel::Caution);
        assert_eq!(SafetyLevel::classify(4.99), SafetyLevel::Caution);
        assert_eq!(SafetyLevel::classify(5.0), SafetyLevel::Safe);
    }
}
