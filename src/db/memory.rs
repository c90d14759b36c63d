//! In-process catalog store

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{ActorRecord, CreateMovie, MovieRecord, MovieStore, StoreError, StoreResult};

/// Catalog held in memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    movies: RwLock<Vec<MovieRecord>>,
    actors: RwLock<Vec<ActorRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored movies
    pub fn movie_count(&self) -> usize {
        self.movies.read().len()
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_movies(&self) -> StoreResult<Vec<MovieRecord>> {
        Ok(self.movies.read().clone())
    }

    async fn get_movie(&self, id: &str) -> StoreResult<Option<MovieRecord>> {
        Ok(self.movies.read().iter().find(|m| m.id == id).cloned())
    }

    async fn create_movie(&self, input: CreateMovie) -> StoreResult<MovieRecord> {
        let record = input.into_record();

        // Check and append under one guard so concurrent creates cannot both win
        let mut movies = self.movies.write();
        if movies.iter().any(|m| m.id == record.id) {
            return Err(StoreError::Conflict(record.id));
        }
        movies.push(record.clone());

        Ok(record)
    }

    async fn list_actors(&self) -> StoreResult<Vec<ActorRecord>> {
        Ok(self.actors.read().clone())
    }

    async fn seed_actors(&self, actors: Vec<ActorRecord>) -> StoreResult<()> {
        let mut existing = self.actors.write();
        for actor in actors {
            if !existing.iter().any(|a| a.id == actor.id) {
                existing.push(actor);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn movie(id: &str, title: &str) -> CreateMovie {
        CreateMovie {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_movies_keep_insertion_order() {
        let store = MemoryStore::new();
        store.create_movie(movie("2", "36th Chamber")).await.unwrap();
        store.create_movie(movie("1", "5 Deadly Venoms")).await.unwrap();
        store.create_movie(movie("99", "Drunken Master")).await.unwrap();

        let ids: Vec<String> = store
            .list_movies()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["2", "1", "99"]);
    }

    #[tokio::test]
    async fn test_get_movie() {
        let store = MemoryStore::new();
        store.create_movie(movie("1", "5 Deadly Venoms")).await.unwrap();

        let found = store.get_movie("1").await.unwrap().unwrap();
        assert_eq!(found.title.as_deref(), Some("5 Deadly Venoms"));
        assert!(store.get_movie("404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let store = MemoryStore::new();
        store.create_movie(movie("1", "5 Deadly Venoms")).await.unwrap();

        let err = store.create_movie(movie("1", "Again")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(id) if id == "1"));
        assert_eq!(store.movie_count(), 1);
    }

    #[tokio::test]
    async fn test_seed_actors_skips_existing() {
        let store = MemoryStore::new();
        let gordon = ActorRecord {
            id: "1".to_string(),
            name: "Gordon Liu".to_string(),
        };
        store.seed_actors(vec![gordon.clone()]).await.unwrap();
        store
            .seed_actors(vec![
                gordon.clone(),
                ActorRecord {
                    id: "2".to_string(),
                    name: "Jackie Chan".to_string(),
                },
            ])
            .await
            .unwrap();

        let actors = store.list_actors().await.unwrap();
        assert_eq!(actors.len(), 2);
        assert_eq!(actors[0], gordon);
    }
}
