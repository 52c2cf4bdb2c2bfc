use crate::models::{Direction, TakeProfit};

/// Share of the position closed at each take-profit level.
pub const TP_SPLITS: [f64; 3] = [0.40, 0.35, 0.25];

pub fn take_profit_price(direction: Direction, entry: f64, move_frac: f64) -> f64 {
    entry * (1.0 + direction.sign() * move_frac)
}

pub fn build_takes(
    direction: Direction,
    entry: f64,
    position: f64,
    stop_usd: f64,
    tp_percents: &[f64; 3],
) -> Vec<TakeProfit> {
    tp_percents
        .iter()
        .zip(TP_SPLITS.iter())
        .enumerate()
        .map(|(i, (pct, split))| {
            let usd = position * pct * split;
            let risk_reward = if stop_usd > 0.0 { usd / stop_usd } else { 0.0 };
            TakeProfit {
                level: i + 1,
                price: take_profit_price(direction, entry, *pct),
                move_pct: pct * 100.0,
                usd,
                risk_reward,
            }
        })
        .collect()
}
