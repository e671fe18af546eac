//! Lookup port backed by the hardcoded catalog rates.

use async_trait::async_trait;
use exchange_rates::{CurrencyCode, cross_rate};

use rates_types::{Currency, LookupError, RateKey, RateLookupPort};

/// Serves reference rates from the `exchange-rates` catalog.
///
/// Useful for development and as an offline fallback in the CLI. Codes are
/// matched case-insensitively against the catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticRateProvider;

impl StaticRateProvider {
    pub fn new() -> Self {
        Self
    }

    fn resolve(code: &Currency) -> Option<CurrencyCode> {
        code.catalog_entry()
    }
}

#[async_trait]
impl RateLookupPort for StaticRateProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, source: &Currency, target: &Currency) -> Result<f64, LookupError> {
        match (Self::resolve(source), Self::resolve(target)) {
            (Some(from), Some(to)) => Ok(cross_rate(from, to)),
            _ => Err(LookupError::UnknownPair(RateKey::new(
                source.clone(),
                target.clone(),
            ))),
        }
    }
}
