// src/api/handlers.rs

use crate::api::{types::*, ApiState, SERVICE_NAME};
use crate::core::CapitalAnswer;
use crate::infra::errors::CapitalsError;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::Json;
use tracing::Instrument;

pub type ApiError = (StatusCode, HeaderMap, Json<ErrorResponse>);

/// Map a lookup failure to its HTTP status and user-facing body.
///
/// Input problems are 404, rate limiting is 429 with `Retry-After`, and
/// everything else is a 500.
pub fn error_response(err: &CapitalsError) -> ApiError {
    let mut headers = HeaderMap::new();

    let (status, detail) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, err.to_string())
    } else if let CapitalsError::RateLimited { retry_after_ms, .. } = err {
        if *retry_after_ms > 0 {
            let secs = retry_after_ms.div_ceil(1000);
            headers.insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        (
            StatusCode::TOO_MANY_REQUESTS,
            format!("Service error: {err}. Please try again later."),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Service error: {err}"),
        )
    };

    (status, headers, Json(ErrorResponse { detail }))
}

/// GET / — Welcome message and endpoint listing.
pub async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": format!("Welcome to {SERVICE_NAME}!"),
        "endpoints": {
            "capital": "/capital/{country}",
            "clear_cache": "/clear-cache",
            "health": "/health",
        }
    }))
}

/// GET /capital/{country} — Look up the capital of a country.
pub async fn get_capital(
    State(state): State<ApiState>,
    Path(country): Path<String>,
) -> Result<Json<CapitalAnswer>, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("lookup", %request_id);

    async {
        tracing::info!(country = %country, "Looking up capital");
        state.service.lookup(&country).await
    }
    .instrument(span)
    .await
    .map(Json)
    .map_err(|e| error_response(&e))
}

/// POST /clear-cache — Drop every cached lookup.
pub async fn clear_cache(State(state): State<ApiState>) -> Json<MessageResponse> {
    state.service.clear_cache();
    Json(MessageResponse {
        message: "Cache cleared".into(),
    })
}

/// GET /health — Liveness check.
pub async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        cache: state.service.cache_stats(),
    })
}
