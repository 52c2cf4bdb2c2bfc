pub mod limits;
pub mod risk;
pub mod sizing;
pub mod take_profit;
