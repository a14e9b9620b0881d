//! Router assembly: everything under /api, shared layers, and the 404 fallback.

pub mod common;
pub mod legacy;
pub mod resources;

pub use common::common_routes;
pub use legacy::legacy_routes;
pub use resources::{bike_routes, station_routes};

use crate::handlers::meta::fallback;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

const BODY_LIMIT: usize = 1024 * 1024;

pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(common_routes(state.clone()))
        .merge(legacy_routes(state.clone()))
        .nest("/stanice", station_routes(state.clone()))
        .nest("/bicikli", bike_routes(state));

    Router::new().nest("/api", api).fallback(fallback).layer(
        ServiceBuilder::new()
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}
