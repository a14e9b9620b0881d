//! Station handlers under /api/stanice.

use super::{json_body, today};
use crate::error::AppError;
use crate::models::{from_body, parse_id, StationInput};
use crate::response::{created, ok};
use crate::service::{BikeService, StationService};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

const NOT_FOUND: &str = "Station with the provided ID does not exist";

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stations = StationService::list(&state.pool).await?;
    Ok(ok("Successfully fetched all stations", stations))
}

pub async fn read(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "station")?;
    let station = StationService::find_with_bikes(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(ok("Successfully fetched station", station))
}

pub async fn bikes(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "station")?;
    if !StationService::exists(&state.pool, id).await? {
        return Err(AppError::NotFound("Station not found".into()));
    }
    let bikes = BikeService::by_station(&state.pool, id).await?;
    Ok(ok(format!("Successfully fetched bikes for station {}", id), bikes))
}

/// `true` or `1` selects active stations; anything else inactive ones.
pub fn parse_active(status: &str) -> bool {
    status == "true" || status == "1"
}

pub async fn by_active(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let active = parse_active(&status);
    let stations = StationService::by_active(&state.pool, active).await?;
    let label = if active { "active" } else { "inactive" };
    Ok(ok(format!("Successfully fetched {} stations", label), stations))
}

pub async fn by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let stations = StationService::by_location(&state.pool, &location).await?;
    Ok(ok(
        format!("Successfully searched stations by location: {}", location),
        stations,
    ))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: StationInput = from_body(json_body(body)?)?;
    let station = input.into_new(today())?;
    let row = StationService::create(&state.pool, &station).await?;
    Ok(created("Station successfully created", row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "station")?;
    let input: StationInput = from_body(json_body(body)?)?;
    let row = StationService::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(ok("Station successfully updated", row))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, "station")?;
    let deleted = StationService::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(ok("Station successfully deleted", json!({ "deleted_id": deleted })))
}
