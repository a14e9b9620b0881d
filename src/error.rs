//! Typed errors and HTTP mapping for both response surfaces.

use crate::response::{Envelope, LegacyFailure, Status};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Db(_) | AppError::Io(_) | AppError::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show a client. Internal failures are logged and replaced by a generic text.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(m) | AppError::BadRequest(m) => m.clone(),
            other => {
                tracing::error!(error = %other, "request failed");
                "Internal Server Error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let label = match status {
            StatusCode::NOT_FOUND => Status::NotFound,
            StatusCode::BAD_REQUEST => Status::BadRequest,
            _ => Status::Error,
        };
        let body = Envelope::<()>::empty(label, self.public_message());
        (status, Json(body)).into_response()
    }
}

/// Error for the legacy search/export routes: same taxonomy, `{success: false, error}` body.
#[derive(Debug)]
pub struct LegacyError(pub AppError);

impl From<AppError> for LegacyError {
    fn from(e: AppError) -> Self {
        LegacyError(e)
    }
}

impl From<sqlx::Error> for LegacyError {
    fn from(e: sqlx::Error) -> Self {
        LegacyError(AppError::Db(e))
    }
}

impl IntoResponse for LegacyError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let body = LegacyFailure {
            success: false,
            error: self.0.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_status_codes() {
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Db(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_hide_driver_message() {
        let e = AppError::Db(sqlx::Error::Protocol("secret detail".into()));
        assert_eq!(e.public_message(), "Internal Server Error");
        assert_eq!(AppError::NotFound("Station not found".into()).public_message(), "Station not found");
    }
}
