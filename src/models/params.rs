use serde::{Deserialize, Serialize};

use crate::models::{Direction, LimitStyle, SizingMethod};

pub const DEFAULT_NUM_LIMITS: u8 = 2;
pub const DEFAULT_DEPOSIT_RISK: f64 = 0.143;
pub const DEFAULT_STOP_RISK: f64 = 0.05;
pub const DEFAULT_TP_PERCENTS: [f64; 3] = [0.07, 0.15, 0.25];
/// Tighter take-profit ladder used by the conservative deployment.
pub const CONSERVATIVE_TP_PERCENTS: [f64; 3] = [0.04, 0.09, 0.16];

/// Position sizing method together with its method-specific inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SizingConfig {
    #[default]
    Fixed,
    Kelly {
        win_rate: f64,
        avg_win_loss_ratio: f64,
    },
    FixedFractional {
        fixed_fraction: f64,
    },
    Volatility {
        atr_value: f64,
        atr_multiplier: f64,
    },
    RiskParity {
        target_risk_pct: f64,
    },
}

impl SizingConfig {
    pub fn method(&self) -> SizingMethod {
        match self {
            SizingConfig::Fixed => SizingMethod::Fixed,
            SizingConfig::Kelly { .. } => SizingMethod::Kelly,
            SizingConfig::FixedFractional { .. } => SizingMethod::FixedFractional,
            SizingConfig::Volatility { .. } => SizingMethod::Volatility,
            SizingConfig::RiskParity { .. } => SizingMethod::RiskParity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeParameters {
    pub deposit: f64,
    pub direction: Direction,
    pub current_price: f64,
    pub leverage: f64,
    #[serde(default = "default_num_limits")]
    pub num_limits: u8,
    #[serde(default = "default_limit_style")]
    pub limit_style: LimitStyle,
    #[serde(default = "default_deposit_risk")]
    pub deposit_risk: f64,
    #[serde(default = "default_stop_risk")]
    pub stop_risk: f64,
    #[serde(default = "default_tp_percents")]
    pub tp_percents: [f64; 3],
    #[serde(default)]
    pub sizing: SizingConfig,
}

fn default_num_limits() -> u8 {
    DEFAULT_NUM_LIMITS
}

fn default_limit_style() -> LimitStyle {
    LimitStyle::Aggressive
}

fn default_deposit_risk() -> f64 {
    DEFAULT_DEPOSIT_RISK
}

fn default_stop_risk() -> f64 {
    DEFAULT_STOP_RISK
}

fn default_tp_percents() -> [f64; 3] {
    DEFAULT_TP_PERCENTS
}

impl TradeParameters {
    pub fn new(deposit: f64, direction: Direction, current_price: f64, leverage: f64) -> Self {
        Self {
            deposit,
            direction,
            current_price,
            leverage,
            num_limits: DEFAULT_NUM_LIMITS,
            limit_style: LimitStyle::Aggressive,
            deposit_risk: DEFAULT_DEPOSIT_RISK,
            stop_risk: DEFAULT_STOP_RISK,
            tp_percents: DEFAULT_TP_PERCENTS,
            sizing: SizingConfig::Fixed,
        }
    }

    pub fn with_num_limits(mut self, num_limits: u8) -> Self {
        self.num_limits = num_limits;
        self
    }

    pub fn with_limit_style(mut self, style: LimitStyle) -> Self {
        self.limit_style = style;
        self
    }

    pub fn with_deposit_risk(mut self, deposit_risk: f64) -> Self {
        self.deposit_risk = deposit_risk;
        self
    }

    /// Risk `1/leverage` of the deposit, so the full position equals the deposit.
    pub fn with_leverage_risk(mut self) -> Self {
        if self.leverage > 0.0 {
            self.deposit_risk = 1.0 / self.leverage;
        }
        self
    }

    pub fn with_stop_risk(mut self, stop_risk: f64) -> Self {
        self.stop_risk = stop_risk;
        self
    }

    pub fn with_tp_percents(mut self, tp_percents: [f64; 3]) -> Self {
        self.tp_percents = tp_percents;
        self
    }

    pub fn with_sizing(mut self, sizing: SizingConfig) -> Self {
        self.sizing = sizing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied_by_constructor() {
        let p = TradeParameters::new(1000.0, Direction::Long, 100.0, 10.0);
        assert_eq!(p.num_limits, 2);
        assert_eq!(p.limit_style, LimitStyle::Aggressive);
        assert_eq!(p.tp_percents, DEFAULT_TP_PERCENTS);
        assert_eq!(p.sizing, SizingConfig::Fixed);
    }

    #[test]
    fn leverage_risk_is_inverse_leverage() {
        let p = TradeParameters::new(1290.0, Direction::Short, 0.466, 7.0).with_leverage_risk();
        assert!((p.deposit_risk - 1.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn deserialize_fills_defaults() {
        let json = r#"{"deposit":500,"direction":"long","current_price":2.5,"leverage":5}"#;
        let p: TradeParameters = serde_json::from_str(json).unwrap();
        assert_eq!(p.num_limits, DEFAULT_NUM_LIMITS);
        assert!((p.stop_risk - DEFAULT_STOP_RISK).abs() < 1e-12);
    }

    #[test]
    fn sizing_config_is_tagged() {
        let json = r#"{"method":"kelly","win_rate":0.55,"avg_win_loss_ratio":2.0}"#;
        let s: SizingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(s.method(), SizingMethod::Kelly);
        let bad = r#"{"method":"martingale"}"#;
        assert!(serde_json::from_str::<SizingConfig>(bad).is_err());
    }
}
