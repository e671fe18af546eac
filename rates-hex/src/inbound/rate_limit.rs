//! Per-client request throttling for the `/api` routes.
//!
//! Clients identify themselves with the `X-Client-Id` header; requests
//! without one share the `anonymous` bucket.

use std::{num::NonZeroU32, sync::Arc, time::Duration};

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use serde_json::json;

/// Header identifying the calling client.
pub const CLIENT_ID_HEADER: &str = "X-Client-Id";

const ANONYMOUS: &str = "anonymous";

/// Token bucket per client id.
pub struct ClientRateLimiter {
    buckets: DefaultKeyedRateLimiter<String>,
    quota: Quota,
}

impl ClientRateLimiter {
    /// Allows `requests` per `period` for each client, all of them usable
    /// as a burst. A zero request count is treated as one.
    pub fn new(requests: u32, period: Duration) -> Self {
        let burst = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period / burst.get())
            .unwrap_or_else(|| Quota::per_minute(burst))
            .allow_burst(burst);

        Self {
            buckets: RateLimiter::keyed(quota),
            quota,
        }
    }

    pub fn per_minute(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(60))
    }

    /// Takes one token from `client`'s bucket. `false` when it is empty.
    pub fn try_acquire(&self, client: &str) -> bool {
        self.buckets.check_key(&client.to_string()).is_ok()
    }

    /// Seconds until a drained bucket regains a token, rounded up.
    pub fn retry_after_secs(&self) -> u64 {
        self.quota.replenish_interval().as_secs_f64().ceil().max(1.0) as u64
    }
}

fn client_id(headers: &HeaderMap) -> &str {
    headers
        .get(CLIENT_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(ANONYMOUS)
}

/// Rejects the request with 429 once the caller's bucket is empty.
pub async fn throttle(
    State(limiter): State<Arc<ClientRateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = client_id(request.headers()).to_owned();

    if limiter.try_acquire(&client) {
        return next.run(request).await;
    }

    tracing::warn!(%client, "Rate limit exceeded");
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({
            "error": "Rate limit exceeded. Please try again later.",
            "code": StatusCode::TOO_MANY_REQUESTS.as_u16(),
            "retry_after_seconds": limiter.retry_after_secs(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_each_client_has_its_own_bucket() {
        let limiter = ClientRateLimiter::per_minute(2);

        assert!(limiter.try_acquire("a"));
        assert!(limiter.try_acquire("a"));
        assert!(!limiter.try_acquire("a"));

        assert!(limiter.try_acquire("b"));
    }

    #[test]
    fn test_zero_requests_still_allows_one() {
        let limiter = ClientRateLimiter::per_minute(0);
        assert!(limiter.try_acquire("a"));
        assert!(!limiter.try_acquire("a"));
    }

    #[test]
    fn test_retry_after_matches_replenish_interval() {
        assert_eq!(ClientRateLimiter::per_minute(6).retry_after_secs(), 10);
        assert_eq!(ClientRateLimiter::per_minute(1000).retry_after_secs(), 1);
    }

    #[test]
    fn test_client_id_falls_back_to_anonymous() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_id(&headers), ANONYMOUS);

        headers.insert(CLIENT_ID_HEADER, HeaderValue::from_static("   "));
        assert_eq!(client_id(&headers), ANONYMOUS);

        headers.insert(CLIENT_ID_HEADER, HeaderValue::from_static(" mobile-app "));
        assert_eq!(client_id(&headers), "mobile-app");
    }
}
