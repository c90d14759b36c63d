//! Seed data for a fresh catalog

use chrono::NaiveDate;
use tracing::info;

use super::{ActorRecord, CreateMovie, MovieStatus, MovieStore, StoreResult};

/// Midnight UTC of the given calendar day, in epoch milliseconds
fn date_millis(year: i32, month: u32, day: u32) -> Option<i64> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// The fixed actor set
pub fn default_actors() -> Vec<ActorRecord> {
    vec![
        ActorRecord {
            id: "1".to_string(),
            name: "Gordon Liu".to_string(),
        },
        ActorRecord {
            id: "2".to_string(),
            name: "Jackie Chan".to_string(),
        },
    ]
}

/// Starter movies
pub fn default_movies() -> Vec<CreateMovie> {
    vec![
        CreateMovie {
            id: Some("1".to_string()),
            title: Some("5 Deadly Venoms".to_string()),
            release_date: date_millis(1983, 10, 10),
            rating: Some(5),
            status: Some(MovieStatus::Watched),
            actor_ids: vec!["1".to_string()],
        },
        CreateMovie {
            id: Some("2".to_string()),
            title: Some("36th Chamber".to_string()),
            release_date: date_millis(1993, 10, 10),
            rating: Some(5),
            status: None,
            actor_ids: Vec::new(),
        },
    ]
}

/// Load the default actors, and the default movies if the store has none.
///
/// Actors are always offered to the store (existing IDs are skipped) since
/// there is no other way to create them.
pub async fn seed_catalog(store: &dyn MovieStore) -> StoreResult<()> {
    store.seed_actors(default_actors()).await?;

    if !store.list_movies().await?.is_empty() {
        info!(backend = store.backend(), "Catalog already has movies, skipping movie seed");
        return Ok(());
    }

    let movies = default_movies();
    let count = movies.len();
    for movie in movies {
        store.create_movie(movie).await?;
    }
    info!(backend = store.backend(), count, "Seeded catalog movies");

    Ok(())
}
