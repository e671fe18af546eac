//! Result formatters.

use tracing::debug;

use rates_types::{Currency, OutputFormat, ResultFormatter};

/// `Результат конвертации: 90.00 EUR`
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainFormatter;

impl ResultFormatter for PlainFormatter {
    fn format(&self, amount: f64, currency: &Currency, precision: usize) -> String {
        debug!(amount, %currency, precision, "Formatting plain result");
        format!("Результат конвертации: {:.*} {}", precision, amount, currency)
    }
}

/// `✨ Conversion result: 90.00 EUR ✨`
#[derive(Debug, Default, Clone, Copy)]
pub struct FancyFormatter;

impl ResultFormatter for FancyFormatter {
    fn format(&self, amount: f64, currency: &Currency, precision: usize) -> String {
        debug!(amount, %currency, precision, "Formatting fancy result");
        format!("✨ Conversion result: {:.*} {} ✨", precision, amount, currency)
    }
}

/// Picks the formatter for an output style.
pub fn formatter_for(format: OutputFormat) -> &'static dyn ResultFormatter {
    match format {
        OutputFormat::Plain => &PlainFormatter,
        OutputFormat::Fancy => &FancyFormatter,
    }
}
