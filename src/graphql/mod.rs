//! GraphQL API with subscriptions for real-time updates
//!
//! This module provides a GraphQL API using async-graphql with support for
//! queries, mutations, and subscriptions over WebSocket.
//!
//! Each domain defines a `#[derive(Default)]` struct with an `#[Object]` (or
//! `#[Subscription]`) impl under `queries/`, `mutations/` or `subscriptions.rs`;
//! `schema.rs` merges them into the roots.

pub(crate) mod helpers;
pub mod identity;
pub mod mutations;
pub mod queries;
pub mod scalars;
mod schema;
mod subscriptions;
pub mod types;

pub use identity::{IdentityExt, PLACEHOLDER_USER_ID, RequestIdentity};
pub use scalars::Date;
pub use schema::{CatalogSchema, MutationRoot, QueryRoot, SubscriptionRoot, build_schema};
pub use types::{Actor, Movie, MovieInput, Status};
