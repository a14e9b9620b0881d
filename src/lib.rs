//! Bike-share inventory REST backend: stations and bikes over PostgreSQL.

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError, LegacyError};
pub use response::{Envelope, Status};
pub use routes::app;
pub use service::{BikeService, SearchService, StationService};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_schema};
