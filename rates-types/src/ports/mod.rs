//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod clock;
mod formatter;
mod lookup;

pub use clock::{Clock, SystemClock};
pub use formatter::ResultFormatter;
pub use lookup::{LookupError, RateLookupPort};

#[cfg(any(test, feature = "test-utils"))]
pub use clock::ManualClock;
