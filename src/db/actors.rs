//! Actor database repository

use sqlx::SqlitePool;

use super::{ActorRecord, StoreResult};

#[derive(Debug, Clone, sqlx::FromRow)]
struct ActorRow {
    id: String,
    name: String,
}

impl From<ActorRow> for ActorRecord {
    fn from(row: ActorRow) -> Self {
        ActorRecord {
            id: row.id,
            name: row.name,
        }
    }
}

pub struct ActorRepository {
    pool: SqlitePool,
}

impl ActorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all actors in seed order
    pub async fn list(&self) -> StoreResult<Vec<ActorRecord>> {
        let rows = sqlx::query_as::<_, ActorRow>("SELECT id, name FROM actors ORDER BY position")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ActorRecord::from).collect())
    }

    /// Insert actors, leaving existing IDs untouched
    pub async fn insert_missing(&self, actors: &[ActorRecord]) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for actor in actors {
            let result = sqlx::query("INSERT OR IGNORE INTO actors (id, name) VALUES (?, ?)")
                .bind(&actor.id)
                .bind(&actor.name)
                .execute(&mut *tx)
                .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
