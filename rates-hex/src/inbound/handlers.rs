//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use rates_types::{AppError, ConvertRequest, LookupError, RateLookupPort};

use crate::ConversionService;

/// Application state shared across handlers.
pub struct AppState<P: RateLookupPort> {
    pub service: ConversionService<P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Lookup(LookupError::UnknownPair(_)) => StatusCode::NOT_FOUND,
            AppError::Lookup(LookupError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Lookup(_) => StatusCode::BAD_GATEWAY,
        };

        let body = serde_json::json!({
            "error": self.0.to_string(),
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// List supported currencies.
pub async fn list_currencies<P: RateLookupPort>(
    State(state): State<Arc<AppState<P>>>,
) -> impl IntoResponse {
    Json(state.service.supported_currencies())
}

/// Get the (cached) rate for a pair.
#[tracing::instrument(skip(state))]
pub async fn get_rate<P: RateLookupPort>(
    State(state): State<Arc<AppState<P>>>,
    Path((from, to)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let rate = state.service.rate(&from, &to).await?;
    Ok(Json(rate))
}

/// Convert an amount.
#[tracing::instrument(skip(state, req), fields(from = %req.from, to = %req.to, amount = req.amount))]
pub async fn convert<P: RateLookupPort>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<ConvertRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let resp = state.service.convert(req).await?;
    Ok(Json(resp))
}

/// Cache counters.
pub async fn cache_stats<P: RateLookupPort>(
    State(state): State<Arc<AppState<P>>>,
) -> impl IntoResponse {
    Json(state.service.cache_stats())
}
