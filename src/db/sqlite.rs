//! SQLite-backed catalog store

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};

use super::actors::ActorRepository;
use super::movies::MovieRepository;
use super::schema_sync::sync_catalog_schema;
use super::sqlite_helpers::{is_memory_url, url_to_path};
use super::{ActorRecord, CreateMovie, MovieRecord, MovieStore, StoreError, StoreResult};

/// Catalog persisted to SQLite
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap an existing pool. The schema must already be synced.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect, create the database file if needed, and sync the schema.
    ///
    /// `url` may be a `sqlite:` URL or a plain filesystem path.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let memory = is_memory_url(url);

        let options = if url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(url)?
        } else {
            SqliteConnectOptions::new().filename(url)
        };
        let options = options.create_if_missing(true);

        if !memory {
            let path = std::path::Path::new(url_to_path(url));
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Unavailable(format!(
                        "cannot create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        // Every connection to `:memory:` is its own database, so keep exactly one alive
        let pool_options = if memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;
        debug!(memory, "SQLite pool connected");

        let sync = sync_catalog_schema(&pool).await?;
        if !sync.errors.is_empty() {
            return Err(StoreError::Unavailable(sync.errors.join("; ")));
        }
        info!(
            tables_created = ?sync.tables_created,
            columns_added = sync.columns_added.len(),
            "SQLite catalog schema ready"
        );

        Ok(Self::new(pool))
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get a movies repository
    pub fn movies(&self) -> MovieRepository {
        MovieRepository::new(self.pool.clone())
    }

    /// Get an actors repository
    pub fn actors(&self) -> ActorRepository {
        ActorRepository::new(self.pool.clone())
    }

    /// Close the pool, waiting for checked-out connections
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl MovieStore for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_movies(&self) -> StoreResult<Vec<MovieRecord>> {
        self.movies().list().await
    }

    async fn get_movie(&self, id: &str) -> StoreResult<Option<MovieRecord>> {
        self.movies().get_by_id(id).await
    }

    async fn create_movie(&self, input: CreateMovie) -> StoreResult<MovieRecord> {
        self.movies().create(input).await
    }

    async fn list_actors(&self) -> StoreResult<Vec<ActorRecord>> {
        self.actors().list().await
    }

    async fn seed_actors(&self, actors: Vec<ActorRecord>) -> StoreResult<()> {
        let inserted = self.actors().insert_missing(&actors).await?;
        debug!(inserted, "Seeded actors");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MovieStatus;
    use pretty_assertions::assert_eq;

    async fn memory_store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:", 5).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_in_order() {
        let store = memory_store().await;

        for (id, title) in [("2", "36th Chamber"), ("1", "5 Deadly Venoms")] {
            store
                .create_movie(CreateMovie {
                    id: Some(id.to_string()),
                    title: Some(title.to_string()),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let titles: Vec<Option<String>> = store
            .list_movies()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                Some("36th Chamber".to_string()),
                Some("5 Deadly Venoms".to_string())
            ]
        );
        assert_eq!(store.movies().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_fields_survive_storage() {
        let store = memory_store().await;
        let created = store
            .create_movie(CreateMovie {
                id: Some("99".to_string()),
                title: Some("Drunken Master".to_string()),
                release_date: Some(286_675_200_123),
                rating: Some(4),
                status: Some(MovieStatus::NotInterested),
                actor_ids: vec!["2".to_string(), "7".to_string()],
            })
            .await
            .unwrap();

        let fetched = store.get_movie("99").await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(store.get_movie("100").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let store = memory_store().await;
        let input = CreateMovie {
            id: Some("1".to_string()),
            ..Default::default()
        };
        store.create_movie(input.clone()).await.unwrap();

        let err = store.create_movie(input).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(id) if id == "1"));
    }

    #[tokio::test]
    async fn test_corrupt_status_is_reported() {
        let store = memory_store().await;
        sqlx::query("INSERT INTO movies (id, status) VALUES ('x', 'loved')")
            .execute(store.pool())
            .await
            .unwrap();

        assert!(matches!(
            store.list_movies().await,
            Err(StoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_actors_keep_seed_order() {
        let store = memory_store().await;
        let actors = vec![
            ActorRecord {
                id: "2".to_string(),
                name: "Jackie Chan".to_string(),
            },
            ActorRecord {
                id: "1".to_string(),
                name: "Gordon Liu".to_string(),
            },
        ];
        store.seed_actors(actors.clone()).await.unwrap();
        store.seed_actors(actors.clone()).await.unwrap();

        assert_eq!(store.list_actors().await.unwrap(), actors);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.db");
        let path = path.to_str().unwrap().to_string();

        let store = SqliteStore::connect(&path, 2).await.unwrap();
        store
            .create_movie(CreateMovie {
                id: Some("1".to_string()),
                title: Some("5 Deadly Venoms".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        store.close().await;

        let reopened = SqliteStore::connect(&path, 2).await.unwrap();
        let movies = reopened.list_movies().await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title.as_deref(), Some("5 Deadly Venoms"));
    }
}
