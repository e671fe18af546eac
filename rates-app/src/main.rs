//! # Rates Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Pick the upstream rate provider
//! - Create the shared rate cache and conversion service
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rates_client::ExchangeRateApiClient;
use rates_hex::{ConversionService, RateCache, RateCacheConfig, StaticRateProvider, inbound::HttpServer};
use rates_types::RateLookupPort;

use config::{Config, ProviderKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rates_app=debug,rates_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting rates server on port {}", config.port);
    tracing::info!(
        provider = ?config.provider,
        freshness_secs = config.cache_freshness.as_secs(),
        timeout = ?config.lookup_timeout,
        "Rate cache configured"
    );

    let lookup: Arc<dyn RateLookupPort> = match config.provider {
        ProviderKind::Static => Arc::new(StaticRateProvider::new()),
        ProviderKind::Http => {
            tracing::info!("Using upstream rates API: {}", config.rates_api_url);
            Arc::new(ExchangeRateApiClient::new(&config.rates_api_url))
        }
    };

    let cache = Arc::new(RateCache::with_config(RateCacheConfig {
        freshness: config.cache_freshness,
        lookup_timeout: config.lookup_timeout,
    }));

    // Create the conversion service
    let service = ConversionService::new(cache, lookup);

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(service, config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
