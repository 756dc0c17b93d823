//! # TaskHub API Server
//!
//! REST API for managing tasks: accounts, authorization-scoped task CRUD,
//! assignment, tagging, filtering and sorting, with a Redis read-through
//! cache in front of PostgreSQL.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskhub-api
//! ```

use std::sync::Arc;

use taskhub_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskhub_shared::{
    cache::{RedisCache, RedisConfig},
    db::{migrations, pool},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskhub_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskHub API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database pool and run migrations
    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    // Initialize Redis cache
    let redis_config = RedisConfig::from_env()?;
    let cache = Arc::new(RedisCache::new(redis_config).await?);

    // Build Axum application
    let state = AppState::new(db, cache, config.clone());
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, exiting...");

    Ok(())
}

/// Resolves when the process receives Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
