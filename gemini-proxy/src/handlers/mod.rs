//! HTTP handlers for gemini-proxy.

pub mod proxy;

use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness check.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "gemini-proxy",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness check: not ready until a credential is configured.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.config.gemini.is_configured() {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "reason": "API key not configured"
            })),
        )
    }
}
