//! Request identity
//!
//! The catalog has no authentication. Every HTTP and WebSocket request is
//! annotated with the same placeholder identity so resolvers and logs have a
//! caller to refer to.

use async_graphql::{Context, ErrorExtensions};
use serde::{Deserialize, Serialize};

/// User ID attached to every request
pub const PLACEHOLDER_USER_ID: &str = "anonymous";

/// Caller identity, available in GraphQL resolvers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestIdentity {
    pub user_id: String,
}

impl RequestIdentity {
    pub fn placeholder() -> Self {
        Self {
            user_id: PLACEHOLDER_USER_ID.to_string(),
        }
    }
}

impl Default for RequestIdentity {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Extension trait to get the caller identity from GraphQL context
pub trait IdentityExt {
    /// The identity attached to the request.
    ///
    /// Fails with code `UNIDENTIFIED` when the transport attached none.
    fn identity(&self) -> async_graphql::Result<&RequestIdentity>;
}

impl<'a> IdentityExt for Context<'a> {
    fn identity(&self) -> async_graphql::Result<&RequestIdentity> {
        self.data::<RequestIdentity>().map_err(|_| {
            tracing::warn!("Request reached a resolver without an identity");
            async_graphql::Error::new("Request has no identity")
                .extend_with(|_, ext| ext.set("code", "UNIDENTIFIED"))
        })
    }
}
