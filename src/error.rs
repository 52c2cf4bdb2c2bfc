use thiserror::Error;

/// Errors raised while validating inputs or loading configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TradeError {
    /// A string did not name a recognised variant.
    #[error("invalid {field}: '{value}'")]
    InvalidEnum { field: &'static str, value: String },

    /// A numeric field is outside its domain.
    #[error("invalid {field} = {value}: {reason}")]
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("num_limits must be 0..=3, got {0}")]
    InvalidLimitCount(u8),

    #[error("configuration error: {0}")]
    Config(String),
}

impl TradeError {
    pub(crate) fn invalid_enum(field: &'static str, value: &str) -> Self {
        TradeError::InvalidEnum {
            field,
            value: value.to_string(),
        }
    }

    pub(crate) fn invalid_value(field: &'static str, value: f64, reason: &'static str) -> Self {
        TradeError::InvalidValue {
            field,
            value,
            reason,
        }
    }

    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            TradeError::InvalidEnum { field, .. } | TradeError::InvalidValue { field, .. } => {
                Some(field)
            }
            TradeError::InvalidLimitCount(_) => Some("num_limits"),
            TradeError::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_field() {
        let err = TradeError::invalid_value("leverage", 0.0, "must be > 0");
        assert_eq!(err.to_string(), "invalid leverage = 0: must be > 0");
        assert_eq!(err.field(), Some("leverage"));
    }

    #[test]
    fn limit_count_maps_to_field() {
        let err = TradeError::InvalidLimitCount(5);
        assert_eq!(err.field(), Some("num_limits"));
        assert!(err.to_string().contains('5'));
    }
}
