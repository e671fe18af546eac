//! # Rates Client
//!
//! A typed client for exchangerate-api style endpoints, exposed to the rest of
//! the workspace as a [`RateLookupPort`].
//!
//! The upstream answers `GET {base_url}/{BASE}` with every rate quoted against
//! `BASE`:
//!
//! ```json
//! { "base": "USD", "rates": { "EUR": 0.92, "RUB": 91.7 } }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use rates_types::{Currency, LookupError, RateKey, RateLookupPort};

/// Public endpoint used when no URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Body of a "latest rates" response.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestRates {
    #[serde(default)]
    pub base: Option<String>,
    pub rates: HashMap<String, f64>,
}

impl LatestRates {
    /// Rate from the response base to `target`.
    pub fn rate_to(&self, target: &str) -> Option<f64> {
        self.rates.get(target).copied()
    }
}

/// Exchange-rate API client.
pub struct ExchangeRateApiClient {
    base_url: String,
    http: Client,
}

impl ExchangeRateApiClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Uses a preconfigured `reqwest` client (proxies, TLS, timeouts).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches every rate quoted against `base`.
    pub async fn latest(&self, base: &str) -> Result<LatestRates, ClientError> {
        let url = format!("{}/{}", self.base_url, base);
        tracing::debug!(%url, "Requesting latest rates");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("error")
                        .or_else(|| v.get("error-type"))
                        .and_then(|e| e.as_str())
                        .map(String::from)
                })
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

impl Default for ExchangeRateApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl RateLookupPort for ExchangeRateApiClient {
    fn name(&self) -> &str {
        "exchangerate-api"
    }

    async fn fetch(&self, source: &Currency, target: &Currency) -> Result<f64, LookupError> {
        let unknown = || LookupError::UnknownPair(RateKey::new(source.clone(), target.clone()));

        let latest = match self.latest(source.as_str()).await {
            Ok(latest) => latest,
            Err(ClientError::Api { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Err(unknown());
            }
            Err(ClientError::Json(e)) => return Err(LookupError::InvalidResponse(e.to_string())),
            Err(e) => return Err(LookupError::Unavailable(e.to_string())),
        };

        latest.rate_to(target.as_str()).ok_or_else(unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};

    #[test]
    fn test_client_creation() {
        let client = ExchangeRateApiClient::new("http://localhost:3000/v4/latest");
        assert_eq!(client.base_url, "http://localhost:3000/v4/latest");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = ExchangeRateApiClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_default_points_at_public_api() {
        assert_eq!(ExchangeRateApiClient::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parse_latest_rates() {
        let body = r#"{"base": "USD", "date": "2024-01-01", "rates": {"EUR": 0.92, "RUB": 91.5}}"#;
        let latest: LatestRates = serde_json::from_str(body).unwrap();
        assert_eq!(latest.base.as_deref(), Some("USD"));
        assert_eq!(latest.rate_to("EUR"), Some(0.92));
        assert_eq!(latest.rate_to("GBP"), None);
    }

    /// Serves canned "latest" responses on an ephemeral local port.
    async fn spawn_upstream() -> String {
        async fn latest(Path(base): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
            match base.as_str() {
                "USD" => Ok(Json(
                    serde_json::json!({ "base": "USD", "rates": { "EUR": 0.92, "USD": 1.0 } }),
                )),
                "BAD" => Ok(Json(serde_json::json!({ "unexpected": true }))),
                "ERR" => Err(StatusCode::SERVICE_UNAVAILABLE),
                _ => Err(StatusCode::NOT_FOUND),
            }
        }

        let app = Router::new().route("/latest/{base}", get(latest));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/latest", addr)
    }

    #[tokio::test]
    async fn test_fetch_rate() {
        let client = ExchangeRateApiClient::new(spawn_upstream().await);

        let rate = client
            .fetch(&Currency::new("USD"), &Currency::new("EUR"))
            .await
            .unwrap();

        assert_eq!(rate, 0.92);
    }

    #[tokio::test]
    async fn test_fetch_missing_target_is_unknown_pair() {
        let client = ExchangeRateApiClient::new(spawn_upstream().await);

        let result = client
            .fetch(&Currency::new("USD"), &Currency::new("GBP"))
            .await;

        assert_eq!(
            result,
            Err(LookupError::UnknownPair(RateKey::new("USD", "GBP")))
        );
    }

    #[tokio::test]
    async fn test_fetch_unknown_base_is_unknown_pair() {
        let client = ExchangeRateApiClient::new(spawn_upstream().await);

        let result = client
            .fetch(&Currency::new("XYZ"), &Currency::new("EUR"))
            .await;

        assert!(matches!(result, Err(LookupError::UnknownPair(_))));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_invalid_response() {
        let client = ExchangeRateApiClient::new(spawn_upstream().await);

        let result = client
            .fetch(&Currency::new("BAD"), &Currency::new("EUR"))
            .await;

        assert!(matches!(result, Err(LookupError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_fetch_upstream_error_is_unavailable() {
        let client = ExchangeRateApiClient::new(spawn_upstream().await);

        let result = client
            .fetch(&Currency::new("ERR"), &Currency::new("EUR"))
            .await;

        assert!(matches!(result, Err(LookupError::Unavailable(msg)) if msg.contains("503")));
    }
}
