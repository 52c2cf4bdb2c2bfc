use serde::{Deserialize, Serialize};

use crate::core::risk::SafetyLevel;
use crate::format::{fmt_pct, fmt_price, fmt_ratio, fmt_usd};
use crate::models::{Direction, TradePlan};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedLimit {
    pub price: String,
    pub margin: String,
    pub split_pct: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedTake {
    pub level: usize,
    pub price: String,
    pub move_pct: String,
    pub usd: String,
    pub risk_reward: String,
}

/// Display-ready trade plan: prices with 6 decimals, USD and percentages
/// with 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeResult {
    pub direction: Direction,
    pub leverage: String,
    pub num_limits: u8,
    pub margin: String,
    pub position: String,
    pub entry_price: String,
    pub stop_price: String,
    pub stop_usd: String,
    pub liquidation_price: String,
    pub liquidation_distance_pct: String,
    pub safety_margin_pct: String,
    pub safety_level: SafetyLevel,
    pub limits: Vec<FormattedLimit>,
    pub takes: Vec<FormattedTake>,
    pub position_sizing_method: String,
    pub position_sizing_note: String,
}

impl From<&TradePlan> for TradeResult {
    fn from(plan: &TradePlan) -> Self {
        let limits = plan
            .limits
            .iter()
            .map(|l| FormattedLimit {
                price: fmt_price(l.price),
                margin: fmt_usd(l.margin),
                split_pct: fmt_pct(l.split * 100.0),
            })
            .collect();

        let takes = plan
            .takes
            .iter()
            .map(|t| FormattedTake {
                level: t.level,
                price: fmt_price(t.price),
                move_pct: fmt_pct(t.move_pct),
                usd: fmt_usd(t.usd),
                risk_reward: fmt_ratio(t.risk_reward),
            })
            .collect();

        let mut result = TradeResult {
            direction: plan.direction,
            leverage: fmt_ratio(plan.leverage),
            num_limits: plan.num_limits,
            margin: fmt_usd(plan.margin),
            position: fmt_usd(plan.position),
            entry_price: fmt_price(plan.entry_price),
            stop_price: fmt_price(plan.stop_price),
            stop_usd: fmt_usd(plan.stop_usd),
            liquidation_price: fmt_price(plan.liquidation_price),
            liquidation_distance_pct: fmt_pct(plan.liquidation_distance_pct),
            safety_margin_pct: fmt_pct(plan.safety_margin_pct),
            safety_level: SafetyLevel::Danger,
            limits,
            takes,
            position_sizing_method: plan.sizing.label.clone(),
            position_sizing_note: plan.sizing.note.clone(),
        };
        // must agree with a reclassification of the formatted string
        result.safety_level = SafetyLevel::from_result(&result);
        result
    }
}

impl From<TradePlan> for TradeResult {
    fn from(plan: TradePlan) -> Self {
        TradeResult::from(&plan)
    }
}

impl TradeResult {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
