//! Station and bike resource routes. Static segments (`aktivne`, `lokacija`) take priority over `:id`.

use crate::handlers::{bikes, stations};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn station_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(stations::list).post(stations::create))
        .route("/aktivne/:status", get(stations::by_active))
        .route("/lokacija/:lokacija", get(stations::by_location))
        .route(
            "/:id",
            get(stations::read).put(stations::update).delete(stations::delete),
        )
        .route("/:id/bicikli", get(stations::bikes))
        .with_state(state)
}

pub fn bike_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(bikes::list).post(bikes::create))
        .route("/:id", get(bikes::read).put(bikes::update).delete(bikes::delete))
        .with_state(state)
}
