//! Shared application state for all routes.

use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub started_at: Instant,
    /// OpenAPI document served at /api/specification.
    pub openapi_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(pool: PgPool, openapi_path: PathBuf) -> Self {
        AppState {
            pool,
            started_at: Instant::now(),
            openapi_path: Arc::new(openapi_path),
        }
    }
}
