//! Result formatting port.

use crate::domain::Currency;

/// Renders a converted amount for display.
pub trait ResultFormatter: Send + Sync {
    fn format(&self, amount: f64, currency: &Currency, precision: usize) -> String;
}
