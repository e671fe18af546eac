//! Opaque currency code.

use serde::{Deserialize, Serialize};
use std::fmt;

use exchange_rates::CurrencyCode;

/// A currency code as seen by the cache and the lookup ports.
///
/// The code is opaque: it is compared byte-for-byte and never normalized
/// here. Normalization and membership checks belong to the validator, so a
/// typo'd code is simply a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Looks the code up in the built-in catalog.
    pub fn catalog_entry(&self) -> Option<CurrencyCode> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<CurrencyCode> for Currency {
    fn from(code: CurrencyCode) -> Self {
        Self::new(code.code())
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
