//! Application state and HTTP router construction.
//!
//! Used by `main` and by the router tests to build the Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::Config;
use crate::graphql::{CatalogSchema, build_schema};
use crate::services::CatalogService;

/// Shared state for HTTP handlers (GraphQL, health routes).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogService>,
    pub schema: CatalogSchema,
}

impl AppState {
    /// Build the schema around the catalog service
    pub fn new(config: Arc<Config>, catalog: Arc<CatalogService>) -> Self {
        let schema = build_schema(catalog.clone());
        Self {
            config,
            catalog,
            schema,
        }
    }
}

/// Build the full Axum router: health, /graphql, /graphql/ws, and layers.
/// Returns Router<()> (state fully applied) for use with axum::serve.
pub fn build_app(state: AppState) -> Router<()> {
    Router::new()
        .merge(api::health::router())
        .merge(api::graphql::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
