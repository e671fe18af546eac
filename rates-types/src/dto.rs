//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Currency;

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Output style for a formatted conversion result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Результат конвертации: 90.00 EUR`
    #[default]
    Plain,
    /// `✨ Conversion result: 90.00 EUR ✨`
    Fancy,
}

/// Request to convert an amount between two currencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertRequest {
    /// Source currency code, case-insensitive
    pub from: String,
    /// Target currency code, case-insensitive
    pub to: String,
    pub amount: f64,
    #[serde(default)]
    pub format: OutputFormat,
    /// Digits after the decimal point (default 2)
    #[serde(default)]
    pub precision: Option<u8>,
}

/// Result of a conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub from: Currency,
    pub to: Currency,
    pub amount: f64,
    pub rate: f64,
    pub converted: f64,
    pub formatted: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// A single cached rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateResponse {
    pub from: Currency,
    pub to: Currency,
    pub rate: f64,
    /// When the rate was obtained from the upstream source
    pub fetched_at: DateTime<Utc>,
}

/// A currency known to the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyInfo {
    pub code: Currency,
    pub symbol: String,
    pub name: String,
    pub decimal_places: u8,
}

/// Counters describing cache behavior since startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Pairs with a stored rate.
    pub entries: usize,
    /// Calls answered with a rate without asking the upstream, including
    /// callers that reused a concurrent successful lookup.
    pub hits: u64,
    /// Upstream lookups for pairs with no stored rate.
    pub misses: u64,
    /// Upstream lookups replacing an expired rate.
    pub refreshes: u64,
    /// Upstream lookups that failed. Callers handed a failure from a
    /// concurrent lookup are not counted again.
    pub failures: u64,
}
