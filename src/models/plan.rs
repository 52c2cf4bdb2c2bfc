use serde::{Deserialize, Serialize};

use crate::models::{Direction, LimitStyle, SizingMethod};

/// One staggered entry order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitOrder {
    pub price: f64,
    pub margin: f64,
    /// Fraction of total margin carried by this order.
    pub split: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TakeProfit {
    /// 1-indexed, same order as the configured percentages.
    pub level: usize,
    pub price: f64,
    pub move_pct: f64,
    pub usd: f64,
    pub risk_reward: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingInfo {
    /// Method actually applied (volatility may fall back to fixed).
    pub method: SizingMethod,
    pub label: String,
    pub note: String,
}

/// Unformatted trade plan. Every value keeps full `f64` precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub direction: Direction,
    pub leverage: f64,
    pub limit_style: LimitStyle,
    /// Requested limit count; 0 yields one market-style entry in `limits`.
    pub num_limits: u8,
    pub margin: f64,
    pub position: f64,
    pub entry_price: f64,
    pub stop_price: f64,
    pub stop_usd: f64,
    pub liquidation_price: f64,
    pub liquidation_distance_pct: f64,
    pub safety_margin_pct: f64,
    pub limits: Vec<LimitOrder>,
    pub takes: Vec<TakeProfit>,
    pub sizing: SizingInfo,
}

impl TradePlan {
    pub fn total_limit_margin(&self) -> f64 {
        self.limits.iter().map(|l| l.margin).sum()
    }

    pub fn total_take_usd(&self) -> f64 {
        self.takes.iter().map(|t| t.usd).sum()
    }
}
