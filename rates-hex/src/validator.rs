//! Input validation for conversion requests.

use std::collections::BTreeSet;

use rates_types::{Currency, CurrencyCode, ValidationError};

/// Largest number of decimal places a result may be rendered with.
pub const MAX_PRECISION: u8 = 10;

/// Checks user-supplied currency codes, amounts and precision.
///
/// Every check returns a typed [`ValidationError`] on failure.
#[derive(Debug, Clone)]
pub struct CurrencyValidator {
    supported: BTreeSet<Currency>,
}

impl CurrencyValidator {
    /// Creates a validator accepting exactly the given codes.
    pub fn new<I, C>(supported: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Currency>,
    {
        Self {
            supported: supported.into_iter().map(Into::into).collect(),
        }
    }

    /// Codes accepted by this validator, sorted.
    pub fn supported(&self) -> impl Iterator<Item = &Currency> {
        self.supported.iter()
    }

    /// Normalizes `input` (trim + uppercase) and checks it is supported.
    pub fn validate_currency(&self, input: &str) -> Result<Currency, ValidationError> {
        let code = input.trim().to_uppercase();
        if code.is_empty() {
            return Err(ValidationError::EmptyCurrency);
        }

        let currency = Currency::new(code);
        if !self.supported.contains(&currency) {
            return Err(ValidationError::UnsupportedCurrency(currency.to_string()));
        }
        Ok(currency)
    }

    /// Accepts finite, strictly positive amounts.
    pub fn validate_amount(&self, amount: f64) -> Result<f64, ValidationError> {
        if amount.is_finite() && amount > 0.0 {
            Ok(amount)
        } else {
            Err(ValidationError::InvalidAmount(amount))
        }
    }

    pub fn validate_precision(&self, precision: u8) -> Result<usize, ValidationError> {
        if precision > MAX_PRECISION {
            return Err(ValidationError::PrecisionOutOfRange {
                got: precision,
                max: MAX_PRECISION,
            });
        }
        Ok(precision as usize)
    }
}

impl Default for CurrencyValidator {
    /// Accepts every currency in the built-in catalog.
    fn default() -> Self {
        Self::new(CurrencyCode::all().iter().copied())
    }
}
