pub mod movies;

pub use movies::MovieMutations;

pub(crate) mod prelude {
    pub(crate) use std::sync::Arc;

    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::db::CreateMovie;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::identity::IdentityExt;
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::CatalogService;
}
