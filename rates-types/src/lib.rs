//! # Rates Types
//!
//! Domain types and port traits for the exchange-rate cache service.
//! This crate has ZERO external IO dependencies - only data structures,
//! error types, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Currency, RateKey)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Validation and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Currency, RateKey};
pub use dto::*;
pub use error::{AppError, ValidationError};
pub use exchange_rates::CurrencyCode;
pub use ports::{Clock, LookupError, RateLookupPort, ResultFormatter, SystemClock};

#[cfg(any(test, feature = "test-utils"))]
pub use ports::ManualClock;
