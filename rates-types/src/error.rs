//! Error types for the rate service.

use crate::ports::LookupError;

/// Input validation failures (bad codes, amounts, precision).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Currency code cannot be empty")]
    EmptyCurrency,

    #[error("Currency '{0}' is not supported")]
    UnsupportedCurrency(String),

    #[error("Amount must be a positive number, got {0}")]
    InvalidAmount(f64),

    #[error("Precision must be between 0 and {max}, got {got}")]
    PrecisionOutOfRange { got: u8, max: u8 },
}

/// Application-level errors (for HTTP responses).
///
/// Either the caller sent something unusable, or the rate source let us down.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RateKey;

    #[test]
    fn test_validation_error_becomes_bad_request() {
        let err: AppError = ValidationError::UnsupportedCurrency("XYZ".into()).into();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("XYZ")));
    }

    #[test]
    fn test_lookup_error_passes_through() {
        let err: AppError = LookupError::UnknownPair(RateKey::new("USD", "XYZ")).into();
        assert_eq!(err.to_string(), "Rate not available for USD/XYZ");
    }
}
