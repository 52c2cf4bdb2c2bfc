use crate::models::{Direction, LimitStyle, TradeParameters};

/// 1290 USD short at 0.466, 7x, two aggressive limits, risking 1/leverage.
pub fn scenario_a() -> TradeParameters {
    TradeParameters::new(1290.0, Direction::Short, 0.466, 7.0)
        .with_num_limits(2)
        .with_limit_style(LimitStyle::Aggressive)
        .with_leverage_risk()
}

/// Plain 10x long on a 1000 USD deposit at price 100.
pub fn long_params() -> TradeParameters {
    TradeParameters::new(1000.0, Direction::Long, 100.0, 10.0).with_deposit_risk(0.1)
}
