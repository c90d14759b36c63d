// Helper functions shared across GraphQL query/mutation modules.

use async_graphql::{ErrorExtensions, ID};

use crate::db::{MovieRecord, StoreError};
use crate::graphql::scalars::Date;
use crate::graphql::types::{Movie, Status};

/// Convert a MovieRecord from the store to a GraphQL Movie type
pub(crate) fn movie_record_to_graphql(r: MovieRecord) -> Movie {
    Movie {
        id: ID(r.id),
        title: r.title,
        release_date: r.release_date.and_then(Date::from_millis),
        rating: r.rating,
        status: r.status.map(Status::from),
        actor_ids: r.actor_ids,
    }
}

/// Movie list in the schema's `[Movie]` shape
pub(crate) fn movie_list(records: Vec<MovieRecord>) -> Vec<Option<Movie>> {
    records
        .into_iter()
        .map(|r| Some(movie_record_to_graphql(r)))
        .collect()
}

/// Convert a storage failure into a GraphQL error with a machine-readable code
pub(crate) fn store_error(e: StoreError) -> async_graphql::Error {
    let code = match e {
        StoreError::Conflict(_) => "CONFLICT",
        StoreError::InvalidInput(_) => "BAD_USER_INPUT",
        _ => "STORAGE_ERROR",
    };
    async_graphql::Error::new(e.to_string()).extend_with(|_, ext| ext.set("code", code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MovieStatus;

    #[test]
    fn test_record_conversion() {
        let movie = movie_record_to_graphql(MovieRecord {
            id: "1".to_string(),
            title: Some("5 Deadly Venoms".to_string()),
            release_date: Some(434_592_000_000),
            rating: Some(5),
            status: Some(MovieStatus::Watched),
            actor_ids: vec!["1".to_string()],
        });

        assert_eq!(movie.id, ID::from("1"));
        assert_eq!(movie.release_date.map(|d| d.timestamp_millis()), Some(434_592_000_000));
        assert_eq!(movie.status, Some(Status::Watched));
        assert_eq!(movie.actor_ids, vec!["1".to_string()]);
    }

    #[test]
    fn test_store_error_codes() {
        let err = store_error(StoreError::Conflict("1".to_string()));
        let code = err
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code").cloned());
        assert_eq!(code, Some(async_graphql::Value::from("CONFLICT")));

        let err = store_error(StoreError::Unavailable("down".to_string()));
        let code = err
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code").cloned());
        assert_eq!(code, Some(async_graphql::Value::from("STORAGE_ERROR")));

        let err = store_error(StoreError::InvalidInput("movie is required".to_string()));
        let code = err
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code").cloned());
        assert_eq!(code, Some(async_graphql::Value::from("BAD_USER_INPUT")));
    }
}
