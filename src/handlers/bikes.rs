//! Bike handlers under /api/bicikli.

use super::{json_body, today};
use crate::error::AppError;
use crate::models::{from_body, parse_id, BikeInput};
use crate::response::{created, ok};
use crate::service::BikeService;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

const NOT_FOUND: &str = "Bike with the provided ID does not exist";

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bikes = BikeService::list(&state.pool).await?;
    Ok(ok("Successfully fetched all bikes", bikes))
}

pub async fn read(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "bike")?;
    let bike = BikeService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(ok("Successfully fetched bike", bike))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: BikeInput = from_body(json_body(body)?)?;
    let bike = input.into_new(today())?;
    let row = BikeService::create(&state.pool, &bike).await?;
    Ok(created("Bike successfully created", row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "bike")?;
    let input: BikeInput = from_body(json_body(body)?)?;
    let row = BikeService::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(ok("Bike successfully updated", row))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "bike")?;
    let deleted = BikeService::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(ok("Bike successfully deleted", json!({ "deleted_id": deleted })))
}
