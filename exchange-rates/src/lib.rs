//! Currency Catalog with Macro-Based Currency Generation
//!
//! This library describes the currencies the converter knows about. Each
//! currency is declared once in the `define_currencies!` invocation, which
//! generates the `CurrencyCode` enum together with its metadata accessors,
//! parsing, and the reference-rate helpers.
//!
//! # Adding a New Currency
//! Simply add a line to the `define_currencies!` macro invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     CHF => ("CHF", "Fr", "Swiss franc", 2, 1.13),
//! }
//! ```
//!
//! # Example
//! ```
//! use exchange_rates::{CurrencyCode, cross_rate};
//!
//! let eur: CurrencyCode = "eur".parse().unwrap();
//! assert_eq!(eur.symbol(), "€");
//!
//! let rate = cross_rate(CurrencyCode::USD, CurrencyCode::EUR);
//! assert!(rate > 0.0);
//! ```

/// Error returned when a code is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines all currencies and the CurrencyCode enum
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define currencies with auto-generated metadata and rate helpers.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Name => ("CODE", "SYMBOL", "display name", decimals, to_usd_rate),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal, $display:literal, $decimals:expr, $to_usd:expr)
        ),* $(,)?
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $display),*
                }
            }

            /// Number of digits after the decimal point in the minor unit.
            pub fn decimal_places(&self) -> u8 {
                match self {
                    $(CurrencyCode::$name => $decimals),*
                }
            }

            /// How many US dollars one unit of this currency is worth.
            pub fn base_to_usd_rate(&self) -> f64 {
                match self {
                    $(CurrencyCode::$name => $to_usd),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = UnknownCurrency;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err(UnknownCurrency(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", "$", "US dollar", 2, 1.0),
    EUR => ("EUR", "€", "euro", 2, 1.087),
    GBP => ("GBP", "£", "pound sterling", 2, 1.266),
    JPY => ("JPY", "¥", "yen", 0, 0.0067),
    RUB => ("RUB", "₽", "rouble", 2, 0.0109),
}

// ─────────────────────────────────────────────────────────────────────────────
// Reference Rates
// ─────────────────────────────────────────────────────────────────────────────

/// Units of `to` received for one unit of `from`, computed through USD.
pub fn cross_rate(from: CurrencyCode, to: CurrencyCode) -> f64 {
    if from == to {
        return 1.0;
    }
    from.base_to_usd_rate() / to.base_to_usd_rate()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
