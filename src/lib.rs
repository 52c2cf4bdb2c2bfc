pub mod calculator;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod models;
#[cfg(test)]
pub mod test_helpers;

pub use calculator::{calculate_trade, plan_trade, TradeCalculator};
pub use crate::core::risk::SafetyLevel;
pub use error::TradeError;
pub use models::{
    Direction, LimitStyle, SizingConfig, SizingMethod, TradeParameters, TradePlan, TradeResult,
};
