use tracing::debug;

use crate::models::{Direction, LimitOrder, LimitStyle};

pub const MAX_LIMITS: u8 = 3;

/// Fractional price offsets from the current price per `(direction, style)`.
///
/// Longs buy below the market, shorts sell above it. The first `num_limits`
/// entries are used, then reordered best price first.
pub fn offsets_for(direction: Direction, style: LimitStyle) -> &'static [f64; 3] {
    match (direction, style) {
        (Direction::Long, LimitStyle::Aggressive) => &[-0.002, -0.004, -0.006],
        (Direction::Long, LimitStyle::Equal) => &[-0.005, -0.010, -0.015],
        (Direction::Long, LimitStyle::Moderate) => &[-0.010, -0.020, -0.030],
        (Direction::Short, LimitStyle::Aggressive) => &[0.004, 0.002, 0.006],
        (Direction::Short, LimitStyle::Equal) => &[0.010, 0.020, 0.030],
        (Direction::Short, LimitStyle::Moderate) => &[0.010, 0.020, 0.030],
    }
}

/// Margin split per position, index 0 being the best price.
///
/// Returns an empty vec for `n == 0`. Callers must keep `n <= MAX_LIMITS`.
pub fn margin_splits(style: LimitStyle, n: u8) -> Vec<f64> {
    match (n, style) {
        (0, _) => Vec::new(),
        (1, _) => vec![1.0],
        (n, LimitStyle::Equal) => vec![1.0 / f64::from(n); n as usize],
        (2, LimitStyle::Aggressive) => vec![0.7, 0.3],
        (_, LimitStyle::Aggressive) => vec![0.6, 0.3, 0.1],
        (2, LimitStyle::Moderate) => vec![0.4, 0.6],
        (_, LimitStyle::Moderate) => vec![0.3, 0.3, 0.4],
    }
}

/// Sort offsets so that index 0 is the best fill for `direction`:
/// lowest price for a long, highest for a short.
pub fn order_best_first(direction: Direction, offsets: &mut [f64]) {
    match direction {
        Direction::Long => offsets.sort_by(|a, b| a.total_cmp(b)),
        Direction::Short => offsets.sort_by(|a, b| b.total_cmp(a)),
    }
}

/// Build the staggered entry orders.
///
/// With `num_limits == 0` a single market-style entry at `current_price`
/// carries the whole margin.
pub fn build_limits(
    direction: Direction,
    current_price: f64,
    num_limits: u8,
    style: LimitStyle,
    margin: f64,
) -> Vec<LimitOrder> {
    if num_limits == 0 {
        return vec![LimitOrder {
            price: current_price,
            margin,
            split: 1.0,
        }];
    }

    let n = num_limits.min(MAX_LIMITS);
    let mut offsets: Vec<f64> = offsets_for(direction, style)[..n as usize].to_vec();
    order_best_first(direction, &mut offsets);
    let splits = margin_splits(style, n);

    let limits: Vec<LimitOrder> = offsets
        .iter()
        .zip(splits.iter())
        .map(|(offset, split)| LimitOrder {
            price: current_price * (1.0 + offset),
            margin: margin * split,
            split: *split,
        })
        .collect();

    debug!(
        %direction,
        %style,
        count = limits.len(),
        "limit entries built"
    );
    limits
}

/// Margin-weighted average fill price.
pub fn weighted_entry(limits: &[LimitOrder]) -> f64 {
    let weight: f64 = limits.iter().map(|l| l.split).sum();
    if weight <= 0.0 {
        return 0.0;
    }
    limits.iter().map(|l| l.price * l.split).sum::<f64>() / weight
}
