//! # Rates Hex
//!
//! Application layer and adapters for the exchange-rate service.
//!
//! ## Architecture
//!
//! - `cache/` - Time-bounded rate cache in front of a `RateLookupPort`
//! - `service/` - Conversion service (validate, look up through the cache, format)
//! - `validator/`, `formatter/` - Input checks and result rendering
//! - `inbound/` - HTTP adapter (Axum server)
//! - `outbound/` - Lookup adapters that need no network
//!
//! The service is generic over `P: RateLookupPort`, allowing different
//! rate sources to be injected.

pub mod cache;
pub mod formatter;
pub mod inbound;
pub mod outbound;
pub mod service;
pub mod validator;

#[cfg(test)]
mod service_tests;

pub use cache::{CachedRate, RateCache, RateCacheConfig};
pub use formatter::{FancyFormatter, PlainFormatter, formatter_for};
pub use outbound::StaticRateProvider;
pub use service::ConversionService;
pub use validator::CurrencyValidator;
