//! Exchange rate lookup port.
//!
//! This trait defines the interface for upstream rate sources.
//! Implementations can be HTTP clients, static tables, mocks, etc.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Currency, RateKey};

/// Error type for rate lookups.
///
/// `Clone` so that one failed lookup can be handed to every caller that was
/// waiting on it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("Rate service unavailable: {0}")]
    Unavailable(String),

    #[error("Rate not available for {0}")]
    UnknownPair(RateKey),

    #[error("Invalid response from rate service: {0}")]
    InvalidResponse(String),

    #[error("Rate lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Port trait for exchange rate sources.
#[async_trait::async_trait]
pub trait RateLookupPort: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch the current rate: how many units of `target` one unit of
    /// `source` buys.
    async fn fetch(&self, source: &Currency, target: &Currency) -> Result<f64, LookupError>;
}

#[async_trait::async_trait]
impl<T: RateLookupPort + ?Sized> RateLookupPort for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(&self, source: &Currency, target: &Currency) -> Result<f64, LookupError> {
        (**self).fetch(source, target).await
    }
}

#[async_trait::async_trait]
impl<T: RateLookupPort + ?Sized> RateLookupPort for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(&self, source: &Currency, target: &Currency) -> Result<f64, LookupError> {
        (**self).fetch(source, target).await
    }
}
