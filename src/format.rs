/// Prices use 6 fractional digits; USD amounts, percentages and ratios use 2.
pub const PRICE_DECIMALS: usize = 6;
pub const USD_DECIMALS: usize = 2;

pub fn fmt_price(x: f64) -> String {
    fixed(x, PRICE_DECIMALS)
}

pub fn fmt_usd(x: f64) -> String {
    fixed(x, USD_DECIMALS)
}

pub fn fmt_pct(x: f64) -> String {
    fixed(x, USD_DECIMALS)
}

pub fn fmt_ratio(x: f64) -> String {
    fixed(x, USD_DECIMALS)
}

fn fixed(x: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, x);
    // "-0.00" reads as a loss where there is none
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}
