//! Station queries. Multi-statement writes run in a transaction.

use super::{BikeService, STATION_COLUMNS};
use crate::error::AppError;
use crate::format::{format_pg_rows, format_row, row_to_json};
use crate::models::{NewStation, StationInput};
use serde_json::Value;
use sqlx::{PgExecutor, PgPool};

pub struct StationService;

impl StationService {
    /// All stations ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Value>, AppError> {
        let sql = format!("SELECT {} FROM stanice ORDER BY id", STATION_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(pool).await?;
        Ok(format_pg_rows(&rows))
    }

    pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Value>, AppError> {
        let sql = format!("SELECT {} FROM stanice WHERE id = $1", STATION_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
        Ok(row.map(|r| format_row(row_to_json(&r))))
    }

    /// Station with its bikes nested under `bicikli`, ordered by bike id.
    pub async fn find_with_bikes(pool: &PgPool, id: i32) -> Result<Option<Value>, AppError> {
        let Some(mut station) = Self::find(pool, id).await? else {
            return Ok(None);
        };
        let bikes = BikeService::by_station(pool, id).await?;
        if let Value::Object(map) = &mut station {
            map.insert("bicikli".into(), Value::Array(bikes));
        }
        Ok(Some(station))
    }

    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: i32) -> Result<bool, AppError> {
        let found: Option<i32> = sqlx::query_scalar("SELECT id FROM stanice WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(found.is_some())
    }

    pub async fn by_active(pool: &PgPool, active: bool) -> Result<Vec<Value>, AppError> {
        let sql = format!("SELECT {} FROM stanice WHERE aktivna = $1 ORDER BY id", STATION_COLUMNS);
        tracing::debug!(sql = %sql, active, "query");
        let rows = sqlx::query(&sql).bind(active).fetch_all(pool).await?;
        Ok(format_pg_rows(&rows))
    }

    /// Case-insensitive substring match on address or name.
    pub async fn by_location(pool: &PgPool, location: &str) -> Result<Vec<Value>, AppError> {
        let sql = format!(
            "SELECT {} FROM stanice WHERE adresa ILIKE $1 OR naziv ILIKE $1 ORDER BY id",
            STATION_COLUMNS
        );
        let pattern = crate::sql::like_pattern(location);
        tracing::debug!(sql = %sql, pattern = %pattern, "query");
        let rows = sqlx::query(&sql).bind(pattern).fetch_all(pool).await?;
        Ok(format_pg_rows(&rows))
    }

    /// Insert with id = max(id) + 1. The table lock serializes concurrent creates.
    pub async fn create(pool: &PgPool, station: &NewStation) -> Result<Value, AppError> {
        let mut tx = pool.begin().await?;
        sqlx::query("LOCK TABLE stanice IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;
        let id: i32 = sqlx::query_scalar("SELECT COALESCE(MAX(id), 0) + 1 FROM stanice")
            .fetch_one(&mut *tx)
            .await?;
        let sql = format!(
            "INSERT INTO stanice ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {cols}",
            cols = STATION_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query (tx)");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(&station.naziv)
            .bind(&station.adresa)
            .bind(station.kapacitet)
            .bind(station.geo_lat)
            .bind(station.geo_lon)
            .bind(station.aktivna)
            .bind(station.datum_posljednje_aktivnosti)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(id, "station created");
        Ok(format_row(row_to_json(&row)))
    }

    /// Coalesce update: omitted fields keep their stored value. `None` when the station does not exist.
    pub async fn update(pool: &PgPool, id: i32, input: &StationInput) -> Result<Option<Value>, AppError> {
        let sql = format!(
            "UPDATE stanice SET \
             naziv = COALESCE($1, naziv), \
             adresa = COALESCE($2, adresa), \
             kapacitet = COALESCE($3, kapacitet), \
             geo_lat = COALESCE($4, geo_lat), \
             geo_lon = COALESCE($5, geo_lon), \
             aktivna = COALESCE($6, aktivna), \
             datum_posljednje_aktivnosti = COALESCE($7, datum_posljednje_aktivnosti) \
             WHERE id = $8 RETURNING {}",
            STATION_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql)
            .bind(input.naziv.as_deref())
            .bind(input.adresa.as_deref())
            .bind(input.kapacitet)
            .bind(input.geo_lat)
            .bind(input.geo_lon)
            .bind(input.aktivna)
            .bind(input.datum_posljednje_aktivnosti)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|r| format_row(row_to_json(&r))))
    }

    /// Delete the station's bikes, then the station, atomically. `None` when the station does not exist.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<Option<i32>, AppError> {
        let mut tx = pool.begin().await?;
        let locked: Option<i32> = sqlx::query_scalar("SELECT id FROM stanice WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(None);
        }
        let bikes = sqlx::query("DELETE FROM bicikli WHERE stanica_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM stanice WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(id, bikes, "station deleted");
        Ok(Some(id))
    }
}
