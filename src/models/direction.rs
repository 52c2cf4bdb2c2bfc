use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TradeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }

    /// +1 for long, -1 for short. Multiplies a favourable fractional move.
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

impl FromStr for Direction {
    type Err = TradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" | "buy" => Ok(Direction::Long),
            "short" | "sell" => Ok(Direction::Short),
            _ => Err(TradeError::invalid_enum("direction", s)),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = TradeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Entry style: controls both the limit offsets and the margin split.
///
/// `Aggressive` front-loads margin at the best price, `Moderate` back-loads it
/// at the easiest fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LimitStyle {
    Aggressive,
    Equal,
    Moderate,
}

impl fmt::Display for LimitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitStyle::Aggressive => write!(f, "aggressive"),
            LimitStyle::Equal => write!(f, "equal"),
            LimitStyle::Moderate => write!(f, "moderate"),
        }
    }
}

impl FromStr for LimitStyle {
    type Err = TradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aggressive" | "increasing" => Ok(LimitStyle::Aggressive),
            "equal" => Ok(LimitStyle::Equal),
            "moderate" | "decreasing" => Ok(LimitStyle::Moderate),
            _ => Err(TradeError::invalid_enum("limit_style", s)),
        }
    }
}

impl TryFrom<String> for LimitStyle {
    type Error = TradeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum SizingMethod {
    Fixed,
    Kelly,
    FixedFractional,
    Volatility,
    RiskParity,
}

impl fmt::Display for SizingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SizingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizingMethod::Fixed => "fixed",
            SizingMethod::Kelly => "kelly",
            SizingMethod::FixedFractional => "fixed_fractional",
            SizingMethod::Volatility => "volatility",
            SizingMethod::RiskParity => "risk_parity",
        }
    }
}

impl FromStr for SizingMethod {
    type Err = TradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(SizingMethod::Fixed),
            "kelly" => Ok(SizingMethod::Kelly),
            "fixed_fractional" => Ok(SizingMethod::FixedFractional),
            "volatility" => Ok(SizingMethod::Volatility),
            "risk_parity" => Ok(SizingMethod::RiskParity),
            _ => Err(TradeError::invalid_enum("position_sizing", s)),
        }
    }
}

impl TryFrom<String> for SizingMethod {
    type Error = TradeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
