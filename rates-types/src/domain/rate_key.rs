//! Cache key for a directed currency pair.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Currency;

/// Ordered (source, target) pair.
///
/// `USD/EUR` and `EUR/USD` are distinct keys; no inversion is ever applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateKey {
    pub source: Currency,
    pub target: Currency,
}

impl RateKey {
    pub fn new(source: impl Into<Currency>, target: impl Into<Currency>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for RateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.target)
    }
}
