//! Query execution against PostgreSQL, one service per resource plus the cross-entity search.

pub mod bikes;
pub mod search;
pub mod stations;

pub use bikes::BikeService;
pub use search::SearchService;
pub use stations::StationService;

pub(crate) const STATION_COLUMNS: &str =
    "id, naziv, adresa, kapacitet, geo_lat, geo_lon, aktivna, datum_posljednje_aktivnosti";

pub(crate) const BIKE_COLUMNS: &str = "id, status, tip, zadnje_koristenje, stanica_id";
