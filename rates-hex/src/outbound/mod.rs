//! Outbound adapters that implement `RateLookupPort` without network access.

mod static_rates;

pub use static_rates::StaticRateProvider;
