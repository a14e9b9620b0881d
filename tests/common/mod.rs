#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use nextbike_api::{app, ensure_database_exists, ensure_schema, AppState};
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

static DB_LOCK: Mutex<()> = Mutex::new(());

pub fn openapi_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("openapi.json")
}

/// App over a pool that never connects; only for routes that answer before touching the database.
pub fn offline_app(openapi: PathBuf) -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://nobody@127.0.0.1:1/unused")
        .expect("lazy pool");
    app(AppState::new(pool, openapi))
}

/// App over `DATABASE_URL`, or `None` when it is not set. Tests sharing the database run one at a time.
pub async fn database_app() -> Option<(Router, PgPool, MutexGuard<'static, ()>)> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect DATABASE_URL");
    ensure_schema(&pool).await.expect("schema");
    Some((app(AppState::new(pool.clone(), openapi_path())), pool, guard))
}

/// App over a separate, emptied database on the `DATABASE_URL` server, for tests that need empty tables.
pub async fn scratch_app(database: &str) -> Option<(Router, PgPool, MutexGuard<'static, ()>)> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let guard = DB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let options = PgConnectOptions::from_str(&url).expect("parse DATABASE_URL").database(database);
    ensure_database_exists(&options).await.expect("create scratch database");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("connect scratch database");
    ensure_schema(&pool).await.expect("schema");
    sqlx::query("DELETE FROM bicikli").execute(&pool).await.expect("empty bicikli");
    sqlx::query("DELETE FROM stanice").execute(&pool).await.expect("empty stanice");
    Some((app(AppState::new(pool.clone(), openapi_path())), pool, guard))
}

pub async fn send_raw(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, HeaderMap, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, _, text) = send_raw(app, method, uri, body).await;
    let json = if text.is_empty() { Value::Null } else { serde_json::from_str(&text).unwrap() };
    (status, json)
}
