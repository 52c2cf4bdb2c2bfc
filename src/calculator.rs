use tracing::debug;

use crate::core::limits::{build_limits, weighted_entry, MAX_LIMITS};
use crate::core::risk::{
    liquidation_distance_pct, liquidation_price, safety_margin_pct, stop_price,
};
use crate::core::sizing::size_position;
use crate::core::take_profit::build_takes;
use crate::error::TradeError;
use crate::models::{SizingConfig, TradeParameters, TradePlan, TradeResult};

/// Stateless trade planner.
///
/// Stages run in order: position sizing, limit entries and the weighted
/// entry price, stop, liquidation and safety metrics, then the take-profit
/// ladder.
pub struct TradeCalculator;

impl TradeCalculator {
    /// Validate and compute the numeric plan.
    pub fn plan(params: &TradeParameters) -> Result<TradePlan, TradeError> {
        validate(params)?;

        let sizing = size_position(
            params.deposit,
            params.current_price,
            params.deposit_risk,
            &params.sizing,
        );
        let margin = sizing.margin;
        let position = margin * params.leverage;

        let limits = build_limits(
            params.direction,
            params.current_price,
            params.num_limits,
            params.limit_style,
            margin,
        );
        let entry_price = weighted_entry(&limits);

        let stop_price = stop_price(params.direction, entry_price, params.stop_risk);
        let stop_usd = position * params.stop_risk;
        let liquidation_price = liquidation_price(params.direction, entry_price, params.leverage);
        let liquidation_distance_pct = liquidation_distance_pct(entry_price, liquidation_price);
        let safety_margin_pct = safety_margin_pct(params.direction, stop_price, liquidation_price);

        let takes = build_takes(
            params.direction,
            entry_price,
            position,
            stop_usd,
            &params.tp_percents,
        );

        debug!(
            direction = %params.direction,
            margin,
            position,
            entry_price,
            stop_price,
            liquidation_price,
            safety_margin_pct,
            "trade plan computed"
        );

        Ok(TradePlan {
            direction: params.direction,
            leverage: params.leverage,
            limit_style: params.limit_style,
            num_limits: params.num_limits,
            margin,
            position,
            entry_price,
            stop_price,
            stop_usd,
            liquidation_price,
            liquidation_distance_pct,
            safety_margin_pct,
            limits,
            takes,
            sizing: sizing.info,
        })
    }

    /// Validate, compute and format.
    pub fn calculate(params: &TradeParameters) -> Result<TradeResult, TradeError> {
        Self::plan(params).map(TradeResult::from)
    }
}

pub fn plan_trade(params: &TradeParameters) -> Result<TradePlan, TradeError> {
    TradeCalculator::plan(params)
}

pub fn calculate_trade(params: &TradeParameters) -> Result<TradeResult, TradeError> {
    TradeCalculator::calculate(params)
}

/// Reject out-of-domain inputs before anything is computed.
pub fn validate(params: &TradeParameters) -> Result<(), TradeError> {
    positive("deposit", params.deposit)?;
    positive("current_price", params.current_price)?;
    finite("leverage", params.leverage)?;
    if params.leverage < 1.0 {
        // long liquidation entry * (1 - 1/leverage) must stay >= 0
        return Err(TradeError::invalid_value(
            "leverage",
            params.leverage,
            "must be >= 1",
        ));
    }

    if params.num_limits > MAX_LIMITS {
        return Err(TradeError::InvalidLimitCount(params.num_limits));
    }

    finite("deposit_risk", params.deposit_risk)?;
    if params.deposit_risk <= 0.0 || params.deposit_risk > 1.0 {
        return Err(TradeError::invalid_value(
            "deposit_risk",
            params.deposit_risk,
            "must be in (0, 1]",
        ));
    }

    finite("stop_risk", params.stop_risk)?;
    if params.stop_risk < 0.0 || params.stop_risk >= 1.0 {
        return Err(TradeError::invalid_value(
            "stop_risk",
            params.stop_risk,
            "must be in [0, 1)",
        ));
    }

    for pct in params.tp_percents {
        fraction("tp_percents", pct)?;
    }

    match params.sizing {
        SizingConfig::Fixed => {}
        SizingConfig::Kelly {
            win_rate,
            avg_win_loss_ratio,
        } => {
            fraction("win_rate", win_rate)?;
            positive("avg_win_loss_ratio", avg_win_loss_ratio)?;
        }
        SizingConfig::FixedFractional { fixed_fraction } => {
            fraction("fixed_fraction", fixed_fraction)?;
        }
        SizingConfig::Volatility {
            atr_value,
            atr_multiplier,
        } => {
            finite("atr_value", atr_value)?;
            if atr_value < 0.0 {
                return Err(TradeError::invalid_value(
                    "atr_value",
                    atr_value,
                    "must be >= 0",
                ));
            }
            positive("atr_multiplier", atr_multiplier)?;
        }
        SizingConfig::RiskParity { target_risk_pct } => {
            fraction("target_risk_pct", target_risk_pct)?;
        }
    }

    Ok(())
}

fn finite(field: &'static str, value: f64) -> Result<(), TradeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TradeError::invalid_value(field, value, "must be finite"))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), TradeError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(TradeError::invalid_value(field, value, "must be > 0"))
    }
}

fn fraction(field: &'static str, value: f64) -> Result<(), TradeError> {
    finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TradeError::invalid_value(field, value, "must be in [0, 1]"))
    }
}
