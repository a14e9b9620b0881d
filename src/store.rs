//! Database bootstrap: create the target database and the `stanice` / `bicikli` tables when missing.

use crate::error::AppError;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};

const STANICE_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS stanice (
        id INTEGER PRIMARY KEY,
        naziv TEXT NOT NULL,
        adresa TEXT NOT NULL,
        kapacitet INTEGER NOT NULL,
        geo_lat DOUBLE PRECISION NOT NULL,
        geo_lon DOUBLE PRECISION NOT NULL,
        aktivna BOOLEAN NOT NULL DEFAULT TRUE,
        datum_posljednje_aktivnosti DATE
    )
"#;

const BICIKLI_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS bicikli (
        id INTEGER PRIMARY KEY,
        status TEXT NOT NULL,
        tip TEXT NOT NULL,
        zadnje_koristenje DATE,
        stanica_id INTEGER NOT NULL REFERENCES stanice(id)
    )
"#;

/// Create both tables if they do not exist. Idempotent.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(STANICE_DDL).execute(pool).await?;
    sqlx::query(BICIKLI_DDL).execute(pool).await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS bicikli_stanica_id_idx ON bicikli (stanica_id)")
        .execute(pool)
        .await?;
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the configured database if absent.
pub async fn ensure_database_exists(options: &PgConnectOptions) -> Result<(), AppError> {
    let db_name = match options.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };
    let mut conn = options.clone().database("postgres").connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
