//! Common routes: health, readiness, OpenAPI document.

use crate::handlers::meta::{health, ready, specification};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/specification", get(specification))
        .with_state(state)
}
