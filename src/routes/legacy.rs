//! Legacy search and export routes, kept as a separate contract with their own body shape.

use crate::handlers::legacy::{data, export_csv, export_json};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn legacy_routes(state: AppState) -> Router {
    Router::new()
        .route("/data", get(data))
        .route("/export/csv", get(export_csv))
        .route("/export/json", get(export_json))
        .with_state(state)
}
