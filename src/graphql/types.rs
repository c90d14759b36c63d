//! GraphQL type definitions
//!
//! These types mirror the storage records but are decorated with async-graphql attributes.

use std::sync::Arc;

use async_graphql::{ComplexObject, Context, Enum, ID, InputObject, Result, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::db::{ActorRecord, CreateMovie, MovieStatus};
use crate::services::CatalogService;

use super::helpers::store_error;
use super::scalars::Date;

/// Viewing status of a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Watched,
    Interested,
    NotInterested,
    Unknown,
}

impl From<MovieStatus> for Status {
    fn from(status: MovieStatus) -> Self {
        match status {
            MovieStatus::Watched => Status::Watched,
            MovieStatus::Interested => Status::Interested,
            MovieStatus::NotInterested => Status::NotInterested,
            MovieStatus::Unknown => Status::Unknown,
        }
    }
}

impl From<Status> for MovieStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Watched => MovieStatus::Watched,
            Status::Interested => MovieStatus::Interested,
            Status::NotInterested => MovieStatus::NotInterested,
            Status::Unknown => MovieStatus::Unknown,
        }
    }
}

/// A performer that movies may reference
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Actor {
    pub id: ID,
    pub name: String,
}

impl From<ActorRecord> for Actor {
    fn from(r: ActorRecord) -> Self {
        Actor {
            id: ID(r.id),
            name: r.name,
        }
    }
}

/// A catalog movie
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Movie {
    pub id: ID,
    pub title: Option<String>,
    pub release_date: Option<Date>,
    pub rating: Option<i32>,
    pub status: Option<Status>,
    /// Referenced actor IDs; resolved through `actors`
    #[graphql(skip)]
    pub actor_ids: Vec<String>,
}

#[ComplexObject]
impl Movie {
    /// Actors referenced by this movie, in the actor set's order.
    /// References to unknown actors are left out.
    async fn actors(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<Actor>>>> {
        let catalog = ctx.data_unchecked::<Arc<CatalogService>>();
        let actors = catalog
            .actors_for(&self.actor_ids)
            .await
            .map_err(store_error)?;
        Ok(Some(actors.into_iter().map(|a| Some(Actor::from(a))).collect()))
    }
}

/// Input for adding a movie
#[derive(Debug, Clone, Default, InputObject)]
pub struct MovieInput {
    /// Leave unset to have the store assign one
    pub id: Option<ID>,
    pub title: Option<String>,
    pub release_date: Option<Date>,
    pub rating: Option<i32>,
    pub status: Option<Status>,
    pub actor_ids: Option<Vec<ID>>,
}

impl From<MovieInput> for CreateMovie {
    fn from(input: MovieInput) -> Self {
        CreateMovie {
            id: input.id.map(|id| id.0),
            title: input.title,
            release_date: input.release_date.map(|d| d.timestamp_millis()),
            rating: input.rating,
            status: input.status.map(MovieStatus::from),
            actor_ids: input
                .actor_ids
                .unwrap_or_default()
                .into_iter()
                .map(|id| id.0)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_to_create_movie() {
        let input = MovieInput {
            id: Some(ID::from("99")),
            title: Some("Drunken Master".to_string()),
            release_date: Date::from_millis(286_675_200_000),
            rating: Some(4),
            status: Some(Status::NotInterested),
            actor_ids: Some(vec![ID::from("2")]),
        };

        let create = CreateMovie::from(input);
        assert_eq!(create.id.as_deref(), Some("99"));
        assert_eq!(create.release_date, Some(286_675_200_000));
        assert_eq!(create.status, Some(MovieStatus::NotInterested));
        assert_eq!(create.actor_ids, vec!["2".to_string()]);
    }

    #[test]
    fn test_missing_actor_ids_become_empty() {
        let create = CreateMovie::from(MovieInput::default());
        assert!(create.id.is_none());
        assert!(create.actor_ids.is_empty());
    }
}
