pub mod direction;
pub mod params;
pub mod plan;
pub mod result;

pub use direction::*;
pub use params::{SizingConfig, TradeParameters};
pub use plan::{LimitOrder, SizingInfo, TakeProfit, TradePlan};
pub use result::{FormattedLimit, FormattedTake, TradeResult};
