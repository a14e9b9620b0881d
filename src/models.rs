//! Request bodies for stations and bikes, and their create-time validation.

use crate::error::AppError;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Station fields as sent by a client. Every field is optional so the same shape serves create and coalesce update.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StationInput {
    pub naziv: Option<String>,
    pub adresa: Option<String>,
    pub kapacitet: Option<i32>,
    pub geo_lat: Option<f64>,
    pub geo_lon: Option<f64>,
    pub aktivna: Option<bool>,
    pub datum_posljednje_aktivnosti: Option<NaiveDate>,
}

/// A fully specified station ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStation {
    pub naziv: String,
    pub adresa: String,
    pub kapacitet: i32,
    pub geo_lat: f64,
    pub geo_lon: f64,
    pub aktivna: bool,
    pub datum_posljednje_aktivnosti: NaiveDate,
}

impl StationInput {
    /// Name, address and a non-zero capacity are required; coordinates must be present but may be zero.
    /// `aktivna` defaults to true, the activity date to `today`.
    pub fn into_new(self, today: NaiveDate) -> Result<NewStation, AppError> {
        let missing = || AppError::BadRequest("Missing required fields".into());
        Ok(NewStation {
            naziv: self.naziv.filter(|s| !s.is_empty()).ok_or_else(missing)?,
            adresa: self.adresa.filter(|s| !s.is_empty()).ok_or_else(missing)?,
            kapacitet: self.kapacitet.filter(|n| *n != 0).ok_or_else(missing)?,
            geo_lat: self.geo_lat.ok_or_else(missing)?,
            geo_lon: self.geo_lon.ok_or_else(missing)?,
            aktivna: self.aktivna != Some(false),
            datum_posljednje_aktivnosti: self.datum_posljednje_aktivnosti.unwrap_or(today),
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct BikeInput {
    pub status: Option<String>,
    pub tip: Option<String>,
    pub zadnje_koristenje: Option<NaiveDate>,
    pub stanica_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBike {
    pub status: String,
    pub tip: String,
    pub zadnje_koristenje: NaiveDate,
    pub stanica_id: i32,
}

impl BikeInput {
    /// Status, type and station id are required; last use defaults to `today`.
    /// Whether the station exists is checked by the service.
    pub fn into_new(self, today: NaiveDate) -> Result<NewBike, AppError> {
        let missing = || AppError::BadRequest("Missing required fields".into());
        Ok(NewBike {
            status: self.status.filter(|s| !s.is_empty()).ok_or_else(missing)?,
            tip: self.tip.filter(|s| !s.is_empty()).ok_or_else(missing)?,
            stanica_id: self.stanica_id.filter(|n| *n != 0).ok_or_else(missing)?,
            zadnje_koristenje: self.zadnje_koristenje.unwrap_or(today),
        })
    }
}

/// `search` / `attribute` query parameters of the legacy search and export routes.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub attribute: Option<String>,
}

/// Decode a JSON body that must be an object into `T`.
pub fn from_body<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    if !body.is_object() {
        return Err(AppError::BadRequest("Request body must be a JSON object".into()));
    }
    serde_json::from_value(body).map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e)))
}

/// Parse an integer path id; `what` names the resource in the error message.
pub fn parse_id(raw: &str, what: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID", what)))
}
