use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use moodpick_api::config::Config;
use moodpick_api::db::{self, PgStore};
use moodpick_api::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodpick_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;

    // Database
    let pool = db::pool::create_pool(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    db::pool::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    let store = Arc::new(PgStore::new(pool));
    db::seed::seed(store.as_ref(), &config.admin_password).await?;

    let addr = config.listen_addr();
    let state = AppState::new(store, config);
    let app = moodpick_api::router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    // Connect info feeds the per-IP auth rate limiter.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
