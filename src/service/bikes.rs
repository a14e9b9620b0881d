//! Bike queries.

use super::{StationService, BIKE_COLUMNS};
use crate::error::AppError;
use crate::format::{format_pg_rows, format_row, row_to_json};
use crate::models::{BikeInput, NewBike};
use serde_json::Value;
use sqlx::PgPool;

/// Id of the first bike when the table is empty.
pub const FIRST_BIKE_ID: i32 = 800_001;

pub struct BikeService;

impl BikeService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Value>, AppError> {
        let sql = format!("SELECT {} FROM bicikli ORDER BY id", BIKE_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(pool).await?;
        Ok(format_pg_rows(&rows))
    }

    pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Value>, AppError> {
        let sql = format!("SELECT {} FROM bicikli WHERE id = $1", BIKE_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
        Ok(row.map(|r| format_row(row_to_json(&r))))
    }

    /// Bikes docked at one station, ordered by id.
    pub async fn by_station(pool: &PgPool, station_id: i32) -> Result<Vec<Value>, AppError> {
        let sql = format!("SELECT {} FROM bicikli WHERE stanica_id = $1 ORDER BY id", BIKE_COLUMNS);
        tracing::debug!(sql = %sql, station_id, "query");
        let rows = sqlx::query(&sql).bind(station_id).fetch_all(pool).await?;
        Ok(format_pg_rows(&rows))
    }

    /// Bikes of several stations in one round-trip, ordered by station then id.
    pub async fn by_stations(pool: &PgPool, station_ids: &[i32]) -> Result<Vec<Value>, AppError> {
        if station_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {} FROM bicikli WHERE stanica_id = ANY($1) ORDER BY stanica_id, id",
            BIKE_COLUMNS
        );
        tracing::debug!(sql = %sql, stations = station_ids.len(), "query");
        let rows = sqlx::query(&sql).bind(station_ids).fetch_all(pool).await?;
        Ok(format_pg_rows(&rows))
    }

    /// Insert with id = max(id) + 1 (or `FIRST_BIKE_ID`). The owning station must exist.
    pub async fn create(pool: &PgPool, bike: &NewBike) -> Result<Value, AppError> {
        let mut tx = pool.begin().await?;
        let station: Option<i32> = sqlx::query_scalar("SELECT id FROM stanice WHERE id = $1 FOR SHARE")
            .bind(bike.stanica_id)
            .fetch_optional(&mut *tx)
            .await?;
        if station.is_none() {
            return Err(AppError::BadRequest("Station with provided ID does not exist".into()));
        }
        sqlx::query("LOCK TABLE bicikli IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;
        let id: i32 = sqlx::query_scalar("SELECT COALESCE(MAX(id) + 1, $1) FROM bicikli")
            .bind(FIRST_BIKE_ID)
            .fetch_one(&mut *tx)
            .await?;
        let sql = format!(
            "INSERT INTO bicikli ({cols}) VALUES ($1, $2, $3, $4, $5) RETURNING {cols}",
            cols = BIKE_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query (tx)");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(&bike.status)
            .bind(&bike.tip)
            .bind(bike.zadnje_koristenje)
            .bind(bike.stanica_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(id, station = bike.stanica_id, "bike created");
        Ok(format_row(row_to_json(&row)))
    }

    /// Coalesce update. `None` when the bike does not exist, checked before a new `stanica_id`,
    /// which must name an existing station.
    pub async fn update(pool: &PgPool, id: i32, input: &BikeInput) -> Result<Option<Value>, AppError> {
        let mut tx = pool.begin().await?;
        let bike: Option<i32> = sqlx::query_scalar("SELECT id FROM bicikli WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if bike.is_none() {
            return Ok(None);
        }
        if let Some(station_id) = input.stanica_id {
            if !StationService::exists(&mut *tx, station_id).await? {
                return Err(AppError::BadRequest("Station with provided ID does not exist".into()));
            }
        }
        let sql = format!(
            "UPDATE bicikli SET \
             status = COALESCE($1, status), \
             tip = COALESCE($2, tip), \
             zadnje_koristenje = COALESCE($3, zadnje_koristenje), \
             stanica_id = COALESCE($4, stanica_id) \
             WHERE id = $5 RETURNING {}",
            BIKE_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query (tx)");
        let row = sqlx::query(&sql)
            .bind(input.status.as_deref())
            .bind(input.tip.as_deref())
            .bind(input.zadnje_koristenje)
            .bind(input.stanica_id)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row.map(|r| format_row(row_to_json(&r))))
    }

    /// `None` when the bike does not exist.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<Option<i32>, AppError> {
        tracing::debug!(id, "delete bike");
        let deleted: Option<i32> = sqlx::query_scalar("DELETE FROM bicikli WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(deleted)
    }
}
