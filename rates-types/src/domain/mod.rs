//! Domain models for the rate cache service.

pub mod currency;
pub mod rate_key;

pub use currency::Currency;
pub use rate_key::RateKey;
