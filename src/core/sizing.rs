use tracing::{debug, warn};

use crate::models::{SizingConfig, SizingInfo, SizingMethod};

pub const KELLY_DAMPING: f64 = 0.5;
pub const MAX_KELLY_FRACTION: f64 = 0.25;
/// Volatility sizing never commits less than 1% of the deposit.
pub const VOLATILITY_MARGIN_FLOOR: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct SizingOutcome {
    pub margin: f64,
    pub info: SizingInfo,
}

/// Full Kelly fraction `f = (b*p - q) / b`. May be negative when the edge is.
pub fn kelly_fraction(win_rate: f64, avg_win_loss_ratio: f64) -> f64 {
    if avg_win_loss_ratio <= 0.0 {
        return 0.0;
    }
    let p = win_rate;
    let q = 1.0 - p;
    let b = avg_win_loss_ratio;
    (b * p - q) / b
}

/// Half Kelly clamped to `[0, MAX_KELLY_FRACTION]`.
pub fn applied_kelly_fraction(win_rate: f64, avg_win_loss_ratio: f64) -> f64 {
    let full = kelly_fraction(win_rate, avg_win_loss_ratio);
    (full * KELLY_DAMPING).clamp(0.0, MAX_KELLY_FRACTION)
}

/// Margin committed to the trade under the selected sizing method.
///
/// Inputs are assumed validated.
pub fn size_position(
    deposit: f64,
    current_price: f64,
    deposit_risk: f64,
    sizing: &SizingConfig,
) -> SizingOutcome {
    let outcome = match *sizing {
        SizingConfig::Fixed => fixed(deposit, deposit_risk),
        SizingConfig::Kelly {
            win_rate,
            avg_win_loss_ratio,
        } => {
            let full = kelly_fraction(win_rate, avg_win_loss_ratio);
            let applied = applied_kelly_fraction(win_rate, avg_win_loss_ratio);
            if full <= 0.0 {
                warn!(full_kelly = full, "no edge, kelly margin clamped to zero");
            } else if full * KELLY_DAMPING > MAX_KELLY_FRACTION {
                warn!(full_kelly = full, "half kelly capped at {}", MAX_KELLY_FRACTION);
            }
            SizingOutcome {
                margin: deposit * applied,
                info: SizingInfo {
                    method: SizingMethod::Kelly,
                    label: "Kelly Criterion (half)".to_string(),
                    note: format!(
                        "Win rate: {:.1}%, W/L ratio: {:.2}, Kelly: {:.2}%, applied: {:.2}%",
                        win_rate * 100.0,
                        avg_win_loss_ratio,
                        full * 100.0,
                        applied * 100.0
                    ),
                },
            }
        }
        SizingConfig::FixedFractional { fixed_fraction } => SizingOutcome {
            margin: deposit * fixed_fraction,
            info: SizingInfo {
                method: SizingMethod::FixedFractional,
                label: "Fixed Fractional".to_string(),
                note: format!("Fraction: {:.2}% of deposit", fixed_fraction * 100.0),
            },
        },
        SizingConfig::Volatility {
            atr_value,
            atr_multiplier,
        } => {
            if atr_value > 0.0 {
                let volatility_factor = atr_value * atr_multiplier;
                let base_risk = deposit * deposit_risk;
                let scaled = base_risk / (1.0 + volatility_factor / current_price);
                let margin = scaled.max(deposit * VOLATILITY_MARGIN_FLOOR);
                SizingOutcome {
                    margin,
                    info: SizingInfo {
                        method: SizingMethod::Volatility,
                        label: "Volatility (ATR)".to_string(),
                        note: format!(
                            "ATR: {}, multiplier: {:.2}, volatility factor: {:.6}",
                            atr_value, atr_multiplier, volatility_factor
                        ),
                    },
                }
            } else {
                warn!(atr_value, "ATR not positive, volatility sizing falls back to fixed");
                fixed(deposit, deposit_risk)
            }
        }
        SizingConfig::RiskParity { target_risk_pct } => SizingOutcome {
            margin: deposit * target_risk_pct,
            info: SizingInfo {
                method: SizingMethod::RiskParity,
                label: "Risk Parity".to_string(),
                note: format!("Target risk: {:.2}% of deposit", target_risk_pct * 100.0),
            },
        },
    };

    debug!(
        requested = %sizing.method(),
        method = %outcome.info.method,
        margin = outcome.margin,
        "position sized"
    );
    outcome
}

fn fixed(deposit: f64, deposit_risk: f64) -> SizingOutcome {
    SizingOutcome {
        margin: deposit * deposit_risk,
        info: SizingInfo {
            method: SizingMethod::Fixed,
            label: "Fixed Risk".to_string(),
            note: format!("Deposit risk: {:.2}%", deposit_risk * 100.0),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_is_deposit_times_risk() {
        let out = size_position(1290.0, 0.466, 1.0 / 7.0, &SizingConfig::Fixed);
        assert!((out.margin - 184.285714).abs() < 1e-5);
        assert_eq!(out.info.method, SizingMethod::Fixed);
    }

    #[test]
    fn known_kelly_half_unclamped() {
        // f = (2*0.55 - 0.45)/2 = 0.325, half = 0.1625
        assert!((kelly_fraction(0.55, 2.0) - 0.325).abs() < 1e-12);
        let sizing = SizingConfig::Kelly {
            win_rate: 0.55,
            avg_win_loss_ratio: 2.0,
        };
        let out = size_position(1000.0, 100.0, 0.143, &sizing);
        assert!((out.margin - 162.5).abs() < 1e-9);
        assert_eq!(out.info.method, SizingMethod::Kelly);
    }

    #[test]
    fn kelly_capped_at_max() {
        // f = (3*0.8 - 0.2)/3 = 0.7333, half = 0.3667 -> 0.25
        let sizing = SizingConfig::Kelly {
            win_rate: 0.8,
            avg_win_loss_ratio: 3.0,
        };
        let out = size_position(1000.0, 100.0, 0.143, &sizing);
        assert!((out.margin - 250.0).abs() < 1e-9);
    }

    #[test]
    fn negative_edge_clamps_to_zero() {
        assert!(kelly_fraction(0.2, 1.0) < 0.0);
        let sizing = SizingConfig::Kelly {
            win_rate: 0.2,
            avg_win_loss_ratio: 1.0,
        };
        let out = size_position(1000.0, 100.0, 0.143, &sizing);
        assert_eq!(out.margin, 0.0);
    }

    #[test]
    fn volatility_scales_down_with_atr() {
        let sizing = SizingConfig::Volatility {
            atr_value: 5.0,
            atr_multiplier: 2.0,
        };
        // base 100, factor 10, 100 / (1 + 10/100) = 90.909..
        let out = size_position(1000.0, 100.0, 0.1, &sizing);
        assert!((out.margin - 100.0 / 1.1).abs() < 1e-9);
        assert_eq!(out.info.method, SizingMethod::Volatility);
    }

    #[test]
    fn volatility_floor_is_one_percent() {
        let sizing = SizingConfig::Volatility {
            atr_value: 1000.0,
            atr_multiplier: 3.0,
        };
        let out = size_position(1000.0, 10.0, 0.1, &sizing);
        assert!((out.margin - 10.0).abs() < 1e-9);
    }

    #[test]
    fn volatility_without_atr_falls_back_to_fixed() {
        let sizing = SizingConfig::Volatility {
            atr_value: 0.0,
            atr_multiplier: 2.0,
        };
        let out = size_position(1000.0, 100.0, 0.143, &sizing);
        assert!((out.margin - 143.0).abs() < 1e-9);
        assert_eq!(sizing.method(), SizingMethod::Volatility);
        assert_eq!(out.info.method, SizingMethod::Fixed);
    }

    #[test]
    fn fractional_and_parity_use_their_fraction() {
        let ff = size_position(
            2000.0,
            1.0,
            0.5,
            &SizingConfig::FixedFractional {
                fixed_fraction: 0.02,
            },
        );
        assert!((ff.margin - 40.0).abs() < 1e-9);
        let rp = size_position(
            2000.0,
            1.0,
            0.5,
            &SizingConfig::RiskParity {
                target_risk_pct: 0.05,
            },
        );
        assert!((rp.margin - 100.0).abs() < 1e-9);
        assert_eq!(rp.info.label, "Risk Parity");
    }
}
