//! Catalog services shared by the GraphQL layer

pub mod catalog;
pub mod movie_events;

pub use catalog::{CatalogService, FailurePolicy, ParsePolicyError, select_actors};
pub use movie_events::{MAX_EVENTS_CAPACITY, MOVIE_ADDED, MovieAddedEvent, MovieEventBroker};
