use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::limits::MAX_LIMITS;
use crate::error::TradeError;
use crate::models::params::{
    CONSERVATIVE_TP_PERCENTS, DEFAULT_DEPOSIT_RISK, DEFAULT_NUM_LIMITS, DEFAULT_STOP_RISK,
    DEFAULT_TP_PERCENTS,
};
use crate::models::{LimitStyle, TradeParameters};

/// Deployment defaults applied to trade parameters the caller leaves unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub deposit_risk: f64,
    pub stop_risk: f64,
    pub tp_percents: [f64; 3],
    pub num_limits: u8,
    pub limit_style: LimitStyle,

    // Logging
    pub log_level: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            deposit_risk: DEFAULT_DEPOSIT_RISK,
            stop_risk: DEFAULT_STOP_RISK,
            tp_percents: DEFAULT_TP_PERCENTS,
            num_limits: DEFAULT_NUM_LIMITS,
            limit_style: LimitStyle::Aggressive,
            log_level: "info".to_string(),
        }
    }
}

impl PlannerConfig {
    /// Tighter take-profit ladder.
    pub fn conservative() -> Self {
        Self {
            tp_percents: CONSERVATIVE_TP_PERCENTS,
            ..Self::default()
        }
    }

    /// Read `PLANNER_*` variables, loading `.env` first if present.
    pub fn from_env() -> Result<Self, TradeError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing keys keep their defaults, malformed
    /// ones are an error naming the variable.
    pub fn from_vars<F>(lookup: F) -> Result<Self, TradeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("PLANNER_DEPOSIT_RISK") {
            cfg.deposit_risk = parse_var("PLANNER_DEPOSIT_RISK", &v)?;
        }
        if let Some(v) = lookup("PLANNER_STOP_RISK") {
            cfg.stop_risk = parse_var("PLANNER_STOP_RISK", &v)?;
        }
        if let Some(v) = lookup("PLANNER_TP_PERCENTS") {
            cfg.tp_percents = parse_tp_list(&v)
                .map_err(|e| TradeError::Config(format!("PLANNER_TP_PERCENTS: {e}")))?;
        }
        if let Some(v) = lookup("PLANNER_NUM_LIMITS") {
            let n: u8 = parse_var("PLANNER_NUM_LIMITS", &v)?;
            if n > MAX_LIMITS {
                return Err(TradeError::Config(format!(
                    "PLANNER_NUM_LIMITS: must be 0..={MAX_LIMITS}, got {n}"
                )));
            }
            cfg.num_limits = n;
        }
        if let Some(v) = lookup("PLANNER_LIMIT_STYLE") {
            cfg.limit_style = v
                .parse()
                .map_err(|e| TradeError::Config(format!("PLANNER_LIMIT_STYLE: {e}")))?;
        }
        if let Some(v) = lookup("PLANNER_LOG_LEVEL") {
            cfg.log_level = v;
        }

        Ok(cfg)
    }

    /// Seed parameters for a trade with this config's defaults.
    pub fn apply(&self, params: TradeParameters) -> TradeParameters {
        params
            .with_deposit_risk(self.deposit_risk)
            .with_stop_risk(self.stop_risk)
            .with_tp_percents(self.tp_percents)
            .with_num_limits(self.num_limits)
            .with_limit_style(self.limit_style)
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, TradeError> {
    raw.trim()
        .parse()
        .map_err(|_| TradeError::Config(format!("{key}: cannot parse '{raw}'")))
}

/// Parse a comma separated list of exactly three fractions, e.g. `0.07,0.15,0.25`.
pub fn parse_tp_list(raw: &str) -> Result<[f64; 3], String> {
    let values: Vec<f64> = raw
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("'{raw}': {e}"))?;
    <[f64; 3]>::try_from(values.as_slice())
        .map_err(|_| format!("expected 3 values, got {}", values.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = PlannerConfig::from_vars(|_| None).unwrap();
        assert_eq!(cfg, PlannerConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let env = vars(&[
            ("PLANNER_STOP_RISK", "0.03"),
            ("PLANNER_TP_PERCENTS", "0.04, 0.09, 0.16"),
            ("PLANNER_NUM_LIMITS", "3"),
            ("PLANNER_LIMIT_STYLE", "Decreasing"),
        ]);
        let cfg = PlannerConfig::from_vars(|k| env.get(k).cloned()).unwrap();
        assert!((cfg.stop_risk - 0.03).abs() < 1e-12);
        assert_eq!(cfg.tp_percents, CONSERVATIVE_TP_PERCENTS);
        assert_eq!(cfg.num_limits, 3);
        assert_eq!(cfg.limit_style, LimitStyle::Moderate);
    }

    #[test]
    fn malformed_value_is_an_error() {
        let env = vars(&[("PLANNER_LIMIT_STYLE", "yolo")]);
        let err = PlannerConfig::from_vars(|k| env.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("PLANNER_LIMIT_STYLE"));

        let env = vars(&[("PLANNER_NUM_LIMITS", "7")]);
        assert!(PlannerConfig::from_vars(|k| env.get(k).cloned()).is_err());

        let env = vars(&[("PLANNER_TP_PERCENTS", "0.1,0.2")]);
        assert!(PlannerConfig::from_vars(|k| env.get(k).cloned()).is_err());
    }

    #[test]
    fn apply_seeds_parameters() {
        use crate::models::Direction;
        let cfg = PlannerConfig::conservative();
        let p = cfg.apply(TradeParameters::new(100.0, Direction::Long, 1.0, 5.0));
        assert_eq!(p.tp_percents, CONSERVATIVE_TP_PERCENTS);
        assert_eq!(p.num_limits, DEFAULT_NUM_LIMITS);
    }
}
