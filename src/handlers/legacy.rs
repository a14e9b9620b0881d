//! Legacy search and export handlers: `{success, count, data}` bodies and file downloads.

use crate::error::{AppError, LegacyError};
use crate::export::{csv_attachment, json_attachment};
use crate::models::SearchParams;
use crate::response::legacy_many;
use crate::service::SearchService;
use crate::sql::SearchFilter;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};

fn filter(params: &SearchParams) -> Result<Option<SearchFilter>, AppError> {
    SearchFilter::parse(params.search.as_deref(), params.attribute.as_deref())
}

/// GET /api/data
pub async fn data(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, LegacyError> {
    let filter = filter(&params)?;
    let rows = SearchService::joined(&state.pool, filter.as_ref()).await?;
    Ok(legacy_many(rows))
}

/// GET /api/export/csv
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, LegacyError> {
    let filter = filter(&params)?;
    let rows = SearchService::joined(&state.pool, filter.as_ref()).await?;
    tracing::info!(rows = rows.len(), "csv export");
    Ok(csv_attachment(&rows))
}

/// GET /api/export/json
pub async fn export_json(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, LegacyError> {
    let filter = filter(&params)?;
    let stations = SearchService::stations_with_bikes(&state.pool, filter.as_ref()).await?;
    tracing::info!(stations = stations.len(), "json export");
    Ok(json_attachment(&stations).map_err(AppError::from)?)
}
