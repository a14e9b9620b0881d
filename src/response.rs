//! Response envelopes: `{status, message, response}` for the resource routes and
//! `{success, count, data}` / `{success, error}` for the legacy search and export routes.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Created")]
    Created,
    #[serde(rename = "Bad Request")]
    BadRequest,
    #[serde(rename = "Not Found")]
    NotFound,
    #[serde(rename = "Error")]
    Error,
}

#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    pub status: Status,
    pub message: String,
    pub response: Option<T>,
}

impl<T> Envelope<T> {
    pub fn new(status: Status, message: impl Into<String>, response: T) -> Self {
        Envelope {
            status,
            message: message.into(),
            response: Some(response),
        }
    }

    /// Envelope with `response: null`.
    pub fn empty(status: Status, message: impl Into<String>) -> Self {
        Envelope {
            status,
            message: message.into(),
            response: None,
        }
    }
}

pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::OK, Json(Envelope::new(Status::Ok, message, data)))
}

pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, Json(Envelope::new(Status::Created, message, data)))
}

pub fn not_found(message: impl Into<String>) -> (StatusCode, Json<Envelope<()>>) {
    (StatusCode::NOT_FOUND, Json(Envelope::empty(Status::NotFound, message)))
}

#[derive(Serialize, Debug)]
pub struct LegacySuccess<T> {
    pub success: bool,
    pub count: u64,
    pub data: Vec<T>,
}

#[derive(Serialize, Debug)]
pub struct LegacyFailure {
    pub success: bool,
    pub error: String,
}

pub fn legacy_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<LegacySuccess<T>>) {
    let count = data.len() as u64;
    (
        StatusCode::OK,
        Json(LegacySuccess {
            success: true,
            count,
            data,
        }),
    )
}
