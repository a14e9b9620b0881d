//! Health, readiness, the OpenAPI document and the unmatched-route fallback.

use crate::response::{not_found, ok, Envelope, Status};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct Uptime {
    /// Seconds since the process started serving.
    pub uptime: f64,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.started_at.elapsed().as_secs_f64();
    ok("Server is running", Uptime { uptime })
}

pub async fn ready(State(state): State<AppState>) -> Response {
    match sqlx::query("SELECT 1").fetch_optional(&state.pool).await {
        Ok(_) => ok("Database reachable", ()).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Envelope::<()>::empty(Status::Error, "Database unavailable")),
            )
                .into_response()
        }
    }
}

/// Serves the OpenAPI JSON document from disk as-is.
pub async fn specification(State(state): State<AppState>) -> Response {
    let loaded = tokio::fs::read_to_string(state.openapi_path.as_ref())
        .await
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str::<Value>(&text).map_err(|e| e.to_string()));
    match loaded {
        Ok(doc) => Json(doc).into_response(),
        Err(e) => {
            tracing::error!(path = %state.openapi_path.display(), error = %e, "cannot load OpenAPI document");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Envelope::<()>::empty(Status::Error, "Cannot load OpenAPI specification")),
            )
                .into_response()
        }
    }
}

pub async fn fallback() -> impl IntoResponse {
    not_found("Endpoint not found")
}
