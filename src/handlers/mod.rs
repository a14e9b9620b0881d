//! HTTP handlers: station and bike resources, legacy search/export, health and documents.

pub mod bikes;
pub mod legacy;
pub mod meta;
pub mod stations;

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use chrono::NaiveDate;
use serde_json::Value;

/// Unwrap a JSON body, reporting malformed input as a 400 envelope instead of axum's plain-text rejection.
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(v)| v)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e.body_text())))
}

/// Current UTC calendar date, the default for activity and last-use dates.
pub(crate) fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
