//! Conversion Application Service
//!
//! Orchestrates validation, cached rate lookups and formatting.
//! Contains NO infrastructure logic - the rate source is injected as a port.

use std::sync::Arc;

use tracing::{debug, info};

use rates_types::{
    AppError, CacheStats, ConvertRequest, ConvertResponse, Currency, CurrencyInfo,
    RateLookupPort, RateResponse,
};

use crate::cache::RateCache;
use crate::formatter::formatter_for;
use crate::validator::CurrencyValidator;

/// Precision used when a request does not specify one.
pub const DEFAULT_PRECISION: u8 = 2;

/// Application service for currency conversion.
///
/// Generic over `P: RateLookupPort` - the rate source is injected at compile time.
/// The cache is shared (`Arc`) so several services or adapters can sit on
/// top of the same memoized rates.
pub struct ConversionService<P: RateLookupPort> {
    cache: Arc<RateCache>,
    lookup: P,
    validator: CurrencyValidator,
}

impl<P: RateLookupPort> ConversionService<P> {
    /// Creates a new service accepting every catalog currency.
    pub fn new(cache: Arc<RateCache>, lookup: P) -> Self {
        Self {
            cache,
            lookup,
            validator: CurrencyValidator::default(),
        }
    }

    /// Replaces the validator (e.g. to restrict the accepted currencies).
    pub fn with_validator(mut self, validator: CurrencyValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Returns the shared cache.
    pub fn cache(&self) -> &Arc<RateCache> {
        &self.cache
    }

    /// Returns the underlying rate source.
    pub fn lookup(&self) -> &P {
        &self.lookup
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `req.amount` from `req.from` to `req.to`.
    #[tracing::instrument(skip(self, req), fields(from = %req.from, to = %req.to, amount = req.amount))]
    pub async fn convert(&self, req: ConvertRequest) -> Result<ConvertResponse, AppError> {
        let from = self.validator.validate_currency(&req.from)?;
        let to = self.validator.validate_currency(&req.to)?;
        let amount = self.validator.validate_amount(req.amount)?;
        let precision = self
            .validator
            .validate_precision(req.precision.unwrap_or(DEFAULT_PRECISION))?;

        let rate = self.cache.get_rate(&from, &to, &self.lookup).await?;
        debug!(rate, "Exchange rate resolved");

        let converted = amount * rate;
        let formatted = formatter_for(req.format).format(converted, &to, precision);
        info!(converted, %formatted, "Conversion complete");

        Ok(ConvertResponse {
            from,
            to,
            amount,
            rate,
            converted,
            formatted,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rates
    // ─────────────────────────────────────────────────────────────────────────────

    /// Gets the current rate for a pair, through the cache.
    #[tracing::instrument(skip(self))]
    pub async fn rate(&self, from: &str, to: &str) -> Result<RateResponse, AppError> {
        let from = self.validator.validate_currency(from)?;
        let to = self.validator.validate_currency(to)?;

        let quote = self.cache.get_quote(&from, &to, &self.lookup).await?;

        Ok(RateResponse {
            from,
            to,
            rate: quote.rate,
            fetched_at: quote.fetched_at,
        })
    }

    /// Lists the currencies this service accepts.
    pub fn supported_currencies(&self) -> Vec<CurrencyInfo> {
        self.validator.supported().map(describe).collect()
    }

    /// Returns cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

fn describe(code: &Currency) -> CurrencyInfo {
    match code.catalog_entry() {
        Some(entry) => CurrencyInfo {
            code: code.clone(),
            symbol: entry.symbol().to_string(),
            name: entry.name().to_string(),
            decimal_places: entry.decimal_places(),
        },
        None => CurrencyInfo {
            code: code.clone(),
            symbol: code.to_string(),
            name: code.to_string(),
            decimal_places: 2,
        },
    }
}
