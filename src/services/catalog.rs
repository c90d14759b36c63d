//! Catalog service: store access, the failure policy, and movieAdded publishing.
//!
//! GraphQL resolvers go through this service rather than the store so that the
//! failure policy is applied in one place.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{error, info};

use crate::db::{ActorRecord, CreateMovie, Database, MovieRecord, StoreError, StoreResult};

use super::movie_events::{MovieAddedEvent, MovieEventBroker};

/// How storage failures reach callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and answer with an empty/default value
    #[default]
    SoftFail,
    /// Return the failure to the caller
    Propagate,
}

impl FailurePolicy {
    /// Apply the policy to a store result.
    ///
    /// Under [FailurePolicy::SoftFail] an error is logged and replaced with
    /// `fallback()`; under [FailurePolicy::Propagate] it is returned as is.
    pub fn resolve<T>(
        &self,
        operation: &'static str,
        result: StoreResult<T>,
        fallback: impl FnOnce() -> T,
    ) -> StoreResult<T> {
        match (result, self) {
            (Ok(value), _) => Ok(value),
            (Err(e), FailurePolicy::SoftFail) => {
                error!(operation, error = %e, "Storage failure, answering with default");
                Ok(fallback())
            }
            (Err(e), FailurePolicy::Propagate) => {
                error!(operation, error = %e, "Storage failure");
                Err(e)
            }
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::SoftFail => f.write_str("soft"),
            FailurePolicy::Propagate => f.write_str("propagate"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("expected 'soft' or 'propagate', got '{0}'")]
pub struct ParsePolicyError(String);

impl FromStr for FailurePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soft" | "soft-fail" | "soft_fail" => Ok(FailurePolicy::SoftFail),
            "propagate" | "strict" => Ok(FailurePolicy::Propagate),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

/// Keep the actors whose IDs appear in `ids`, in the actor set's own order.
/// IDs with no matching actor contribute nothing.
pub fn select_actors(actors: Vec<ActorRecord>, ids: &[String]) -> Vec<ActorRecord> {
    actors
        .into_iter()
        .filter(|actor| ids.iter().any(|id| id == &actor.id))
        .collect()
}

/// Movie catalog operations behind the GraphQL API
pub struct CatalogService {
    store: Database,
    events: Arc<MovieEventBroker>,
    policy: FailurePolicy,
}

impl CatalogService {
    pub fn new(store: Database, events: Arc<MovieEventBroker>, policy: FailurePolicy) -> Self {
        Self {
            store,
            events,
            policy,
        }
    }

    pub fn store(&self) -> &Database {
        &self.store
    }

    pub fn events(&self) -> &Arc<MovieEventBroker> {
        &self.events
    }

    /// Every stored movie in storage order
    pub async fn movies(&self) -> StoreResult<Vec<MovieRecord>> {
        let result = self.store.list_movies().await;
        self.policy.resolve("movies", result, Vec::new)
    }

    /// A single movie, or None when absent
    pub async fn movie(&self, id: &str) -> StoreResult<Option<MovieRecord>> {
        let result = self.store.get_movie(id).await;
        self.policy.resolve("movie", result, || None)
    }

    /// Actors referenced by a movie's actor IDs
    pub async fn actors_for(&self, actor_ids: &[String]) -> StoreResult<Vec<ActorRecord>> {
        if actor_ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = self
            .store
            .list_actors()
            .await
            .map(|actors| select_actors(actors, actor_ids));
        self.policy.resolve("movie.actors", result, Vec::new)
    }

    /// Store a movie, notify subscribers, and return the updated catalog.
    ///
    /// The event goes out only after the create succeeds. A missing input is
    /// a failed create and goes through the failure policy.
    pub async fn add_movie(&self, input: Option<CreateMovie>) -> StoreResult<Vec<MovieRecord>> {
        let Some(input) = input else {
            let result = Err(StoreError::InvalidInput("addMovie requires a movie".to_string()));
            return self.policy.resolve("addMovie", result, Vec::new);
        };

        let result = match self.store.create_movie(input).await {
            Ok(movie) => {
                info!(movie_id = %movie.id, title = ?movie.title, "Movie added");
                self.events.publish(MovieAddedEvent { movie });
                self.store.list_movies().await
            }
            Err(e) => Err(e),
        };
        self.policy.resolve("addMovie", result, Vec::new)
    }
}
