//! HTTP Inbound Adapter
//!
//! Axum routes over the conversion service, throttled per client.

mod handlers;
mod rate_limit;
mod server;

pub use rate_limit::{CLIENT_ID_HEADER, ClientRateLimiter};
pub use server::HttpServer;
