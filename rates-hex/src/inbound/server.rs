//! Router assembly and the serve loop.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use rates_types::RateLookupPort;

use super::handlers::{self, AppState};
use super::rate_limit::{ClientRateLimiter, throttle};
use crate::ConversionService;

const DEFAULT_REQUESTS_PER_MINUTE: u32 = 100;

/// HTTP front end for a [`ConversionService`].
///
/// `/health` sits outside the throttled `/api` tree so probes never eat into
/// a client's quota.
pub struct HttpServer<P: RateLookupPort> {
    state: Arc<AppState<P>>,
    limiter: Arc<ClientRateLimiter>,
}

impl<P: RateLookupPort + 'static> HttpServer<P> {
    pub fn new(service: ConversionService<P>) -> Self {
        Self::with_rate_limit(service, DEFAULT_REQUESTS_PER_MINUTE)
    }

    /// Allows each client `requests_per_minute` calls to `/api`.
    pub fn with_rate_limit(service: ConversionService<P>, requests_per_minute: u32) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            limiter: Arc::new(ClientRateLimiter::per_minute(requests_per_minute)),
        }
    }

    pub fn router(&self) -> Router {
        let api = Router::new()
            .route("/currencies", get(handlers::list_currencies::<P>))
            .route("/rates/{from}/{to}", get(handlers::get_rate::<P>))
            .route("/convert", post(handlers::convert::<P>))
            .route("/cache/stats", get(handlers::cache_stats::<P>))
            .route_layer(middleware::from_fn_with_state(
                Arc::clone(&self.limiter),
                throttle,
            ));

        Router::new()
            .route("/health", get(handlers::health))
            .nest("/api", api)
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::clone(&self.state))
    }

    /// Binds `addr` and serves until Ctrl+C or SIGTERM.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "Rates API listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(wait_for_shutdown())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn wait_for_shutdown() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown requested, draining connections");
}
