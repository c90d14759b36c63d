//! GraphQL schema definition with queries, mutations, and subscriptions

use std::sync::Arc;

use async_graphql::extensions::Tracing;
use async_graphql::{MergedObject, MergedSubscription, Schema};

use crate::services::CatalogService;

use super::mutations::MovieMutations;
use super::queries::MovieQueries;
use super::subscriptions::MovieSubscriptions;

/// The GraphQL schema type
pub type CatalogSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(MovieQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(MovieMutations);

#[derive(MergedSubscription, Default)]
pub struct SubscriptionRoot(MovieSubscriptions);

/// Build the GraphQL schema with all resolvers.
///
/// The catalog service and its event broker are the only schema data; nothing
/// is process-global, so separate schemas are fully isolated.
pub fn build_schema(catalog: Arc<CatalogService>) -> CatalogSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        SubscriptionRoot::default(),
    )
    .data(catalog.events().clone())
    .data(catalog)
    .extension(Tracing)
    .finish()
}
