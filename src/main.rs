//! Server binary: loads settings, prepares the database, serves the API.

use nextbike_api::{app, ensure_database_exists, ensure_schema, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nextbike_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(settings.database.clone())
        .await?;
    tracing::info!("database connected");
    ensure_schema(&pool).await?;

    let state = AppState::new(pool, settings.openapi_path.clone());
    let listener = TcpListener::bind(settings.bind_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    tracing::info!("OpenAPI spec at /api/specification");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
