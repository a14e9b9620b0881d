//! Cross-entity search backing the legacy data and export routes.

use super::BikeService;
use crate::error::AppError;
use crate::format::format_pg_rows;
use crate::sql::{joined_search, station_search, QueryBuf, SearchFilter};
use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashMap;

pub struct SearchService;

impl SearchService {
    /// Flat station/bike rows from the left join, filtered.
    pub async fn joined(pool: &PgPool, filter: Option<&SearchFilter>) -> Result<Vec<Value>, AppError> {
        let q = joined_search(filter);
        Self::query_many(pool, &q).await
    }

    /// Filtered stations, each with its bikes nested under `bicikli`.
    pub async fn stations_with_bikes(pool: &PgPool, filter: Option<&SearchFilter>) -> Result<Vec<Value>, AppError> {
        let q = station_search(filter);
        let stations = Self::query_many(pool, &q).await?;
        let ids: Vec<i32> = stations
            .iter()
            .filter_map(|s| s.get("id").and_then(Value::as_i64))
            .filter_map(|id| i32::try_from(id).ok())
            .collect();
        let bikes = BikeService::by_stations(pool, &ids).await?;
        Ok(nest_bikes(stations, bikes))
    }

    async fn query_many(pool: &PgPool, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p);
        }
        let rows = query.fetch_all(pool).await?;
        Ok(format_pg_rows(&rows))
    }
}

/// Attach each bike to its station by `stanica_id`; stations without bikes get an empty array.
fn nest_bikes(stations: Vec<Value>, bikes: Vec<Value>) -> Vec<Value> {
    let mut by_station: HashMap<i64, Vec<Value>> = HashMap::new();
    for bike in bikes {
        if let Some(sid) = bike.get("stanica_id").and_then(Value::as_i64) {
            by_station.entry(sid).or_default().push(bike);
        }
    }
    stations
        .into_iter()
        .map(|mut station| {
            let id = station.get("id").and_then(Value::as_i64);
            let nested = id.and_then(|id| by_station.remove(&id)).unwrap_or_default();
            if let Value::Object(map) = &mut station {
                map.insert("bicikli".into(), Value::Array(nested));
            }
            station
        })
        .collect()
}
