//! Movie catalog backend
//!
//! This is the main entry point for the catalog API.
//! All operations are exposed via GraphQL at /graphql.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_catalog::config::Config;
use movie_catalog::db::{Database, MemoryStore, seed_catalog};
use movie_catalog::services::{CatalogService, MovieEventBroker};
use movie_catalog::{AppState, build_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before tracing
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("Starting movie catalog");
    tracing::info!(
        port = config.port,
        failure_policy = %config.failure_policy,
        "Configuration loaded"
    );

    let store = open_store(&config).await?;
    tracing::info!(backend = store.backend(), "Catalog store ready");

    if config.seed_catalog {
        seed_catalog(store.as_ref())
            .await
            .context("Failed to seed catalog")?;
    }

    let events = MovieEventBroker::new(config.movie_events_capacity);
    let catalog = Arc::new(CatalogService::new(
        store,
        events,
        config.failure_policy,
    ));

    let state = AppState::new(config.clone(), catalog);
    tracing::info!("GraphQL schema built");

    let app = build_app(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Pick the store backend from configuration
async fn open_store(config: &Config) -> anyhow::Result<Database> {
    match config.database_url.as_deref() {
        #[cfg(feature = "sqlite")]
        Some(url) => {
            let store = movie_catalog::db::SqliteStore::connect(url, config.database_max_connections)
                .await
                .context("Failed to open SQLite catalog")?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "sqlite"))]
        Some(_) => {
            tracing::warn!("DATABASE_URL is set but the sqlite feature is disabled; using memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        None => Ok(Arc::new(MemoryStore::new())),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
