//! Catalog storage
//!
//! The API layer only talks to [MovieStore]. Two backends implement it:
//! [MemoryStore] keeps everything in process, [SqliteStore] persists to SQLite
//! through sqlx. Both keep movies in insertion order and actors in seed order.

pub mod memory;
pub mod seed;
pub mod sqlite_helpers;

#[cfg(feature = "sqlite")]
pub mod actors;
#[cfg(feature = "sqlite")]
pub mod movies;
#[cfg(feature = "sqlite")]
pub mod schema_sync;
#[cfg(feature = "sqlite")]
mod sqlite;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use memory::MemoryStore;
pub use seed::{default_actors, default_movies, seed_catalog};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Shared handle to whichever store backs the catalog
pub type Database = Arc<dyn MovieStore>;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Storage-layer failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("movie '{0}' already exists")]
    Conflict(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Viewing status of a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieStatus {
    Watched,
    Interested,
    NotInterested,
    Unknown,
}

impl MovieStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieStatus::Watched => "watched",
            MovieStatus::Interested => "interested",
            MovieStatus::NotInterested => "not_interested",
            MovieStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "watched" => Ok(MovieStatus::Watched),
            "interested" => Ok(MovieStatus::Interested),
            "not_interested" => Ok(MovieStatus::NotInterested),
            "unknown" => Ok(MovieStatus::Unknown),
            other => Err(StoreError::Corrupt(format!("unknown movie status '{}'", other))),
        }
    }
}

/// Movie record as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: String,
    pub title: Option<String>,
    /// Release date in epoch milliseconds (UTC)
    pub release_date: Option<i64>,
    pub rating: Option<i32>,
    pub status: Option<MovieStatus>,
    /// Referenced actor IDs, in the order the caller supplied them
    pub actor_ids: Vec<String>,
}

/// Input for creating a movie
#[derive(Debug, Clone, Default)]
pub struct CreateMovie {
    /// Caller-assigned ID; the store generates one when absent
    pub id: Option<String>,
    pub title: Option<String>,
    pub release_date: Option<i64>,
    pub rating: Option<i32>,
    pub status: Option<MovieStatus>,
    pub actor_ids: Vec<String>,
}

impl CreateMovie {
    /// Resolve the final record, generating an ID when the caller did not supply one
    pub fn into_record(self) -> MovieRecord {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        MovieRecord {
            id,
            title: self.title,
            release_date: self.release_date,
            rating: self.rating,
            status: self.status,
            actor_ids: self.actor_ids,
        }
    }
}

/// Actor record as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRecord {
    pub id: String,
    pub name: String,
}

/// Storage backend for the catalog
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Check that the store can serve requests
    async fn ping(&self) -> StoreResult<()>;

    /// All movies in insertion order
    async fn list_movies(&self) -> StoreResult<Vec<MovieRecord>>;

    /// Look up a single movie
    async fn get_movie(&self, id: &str) -> StoreResult<Option<MovieRecord>>;

    /// Append a movie. Fails with [StoreError::Conflict] if the ID is taken.
    async fn create_movie(&self, input: CreateMovie) -> StoreResult<MovieRecord>;

    /// All actors in seed order
    async fn list_actors(&self) -> StoreResult<Vec<ActorRecord>>;

    /// Load seed actors. Actors whose ID already exists are skipped.
    async fn seed_actors(&self, actors: Vec<ActorRecord>) -> StoreResult<()>;
}
