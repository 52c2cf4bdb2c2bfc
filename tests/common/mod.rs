#![allow(dead_code)]

use leverage_planner::{Direction, LimitStyle, TradeParameters};

pub fn scenario_a() -> TradeParameters {
    TradeParameters::new(1290.0, Direction::Short, 0.466, 7.0)
        .with_num_limits(2)
        .with_limit_style(LimitStyle::Aggressive)
        .with_leverage_risk()
}

pub fn base_long() -> TradeParameters {
    TradeParameters::new(1000.0, Direction::Long, 100.0, 10.0).with_deposit_risk(0.143)
}

/// Every direction/style/limit-count combination on a fixed deposit.
pub fn parameter_grid() -> Vec<TradeParameters> {
    let mut out = Vec::new();
    for direction in [Direction::Long, Direction::Short] {
        for style in [LimitStyle::Aggressive, LimitStyle::Equal, LimitStyle::Moderate] {
            for n in 0..=3u8 {
                for leverage in [2.0, 7.0, 25.0] {
                    out.push(
                        TradeParameters::new(2500.0, direction, 41_250.5, leverage)
                            .with_num_limits(n)
                            .with_limit_style(style)
                            .with_deposit_risk(0.2),
                    );
                }
            }
        }
    }
    out
}

pub fn parse(s: &str) -> f64 {
    s.parse().expect("formatted number")
}
