//! Movie catalog GraphQL API
//!
//! Queries, the `addMovie` mutation and the `movieAdded` subscription are
//! served from `/graphql` and `/graphql/ws`. The catalog lives in memory or in
//! SQLite depending on configuration.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod graphql;
pub mod services;

pub use app::{AppState, build_app};
pub use config::Config;
