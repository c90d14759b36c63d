//! Movie database repository

use sqlx::SqlitePool;

use super::sqlite_helpers::{json_to_vec, vec_to_json};
use super::{CreateMovie, MovieRecord, MovieStatus, StoreError, StoreResult};

/// Movie row as stored in SQLite
#[derive(Debug, Clone, sqlx::FromRow)]
struct MovieRow {
    id: String,
    title: Option<String>,
    release_date: Option<i64>,
    rating: Option<i32>,
    status: Option<String>,
    actor_ids: String,
}

impl TryFrom<MovieRow> for MovieRecord {
    type Error = StoreError;

    fn try_from(row: MovieRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .as_deref()
            .map(str::parse::<MovieStatus>)
            .transpose()?;

        Ok(MovieRecord {
            actor_ids: json_to_vec(&row.actor_ids)?,
            id: row.id,
            title: row.title,
            release_date: row.release_date,
            rating: row.rating,
            status,
        })
    }
}

pub struct MovieRepository {
    pool: SqlitePool,
}

impl MovieRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all movies in insertion order
    pub async fn list(&self) -> StoreResult<Vec<MovieRecord>> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, release_date, rating, status, actor_ids
            FROM movies
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(MovieRecord::try_from).collect()
    }

    /// Get a movie by ID
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<MovieRecord>> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, release_date, rating, status, actor_ids
            FROM movies
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(MovieRecord::try_from).transpose()
    }

    /// Append a movie
    pub async fn create(&self, input: CreateMovie) -> StoreResult<MovieRecord> {
        let record = input.into_record();

        let result = sqlx::query(
            r#"
            INSERT INTO movies (id, title, release_date, rating, status, actor_ids)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.title)
        .bind(record.release_date)
        .bind(record.rating)
        .bind(record.status.map(|s| s.as_str()))
        .bind(vec_to_json(&record.actor_ids))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(record),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Conflict(record.id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Count stored movies
    pub async fn count(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
