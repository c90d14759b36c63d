//! GraphQL subscriptions for real-time updates
//!
//! Subscriptions allow clients to receive push updates over WebSocket.

use std::sync::Arc;

use async_graphql::{Context, Result, Subscription};
use futures::Stream;
use tokio_stream::StreamExt;

use crate::services::MovieEventBroker;

use super::helpers::movie_record_to_graphql;
use super::identity::IdentityExt;
use super::types::Movie;

#[derive(Default)]
pub struct MovieSubscriptions;

#[Subscription]
impl MovieSubscriptions {
    /// Subscribe to movies added after this subscription starts
    async fn movie_added<'ctx>(
        &self,
        ctx: &Context<'ctx>,
    ) -> Result<impl Stream<Item = Option<Movie>> + 'ctx> {
        let identity = ctx.identity()?;
        let broker = ctx.data_unchecked::<Arc<MovieEventBroker>>();
        tracing::debug!(
            user_id = %identity.user_id,
            subscribers = broker.subscriber_count() + 1,
            "movieAdded subscription attached"
        );

        Ok(broker
            .stream()
            .map(|event| Some(movie_record_to_graphql(event.movie))))
    }
}
