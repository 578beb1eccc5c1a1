//! Remote mutation service consumed by the onboarding flow.
//!
//! The transport is opaque to the form and wizard: they talk to a
//! `CollectiveApi`. `GraphqlClient` is the HTTP implementation.

pub mod graphql;
pub mod types;

pub use graphql::GraphqlClient;
pub use types::{
    CollectiveInput, CollectiveMembers, CreateRequest, MemberInput, MemberRecord, UserInput,
};

use async_trait::async_trait;

use crate::entity::{CreatedEntity, CreatedUser};
use crate::error::ApiError;

/// Mutations and queries the onboarding flow issues.
#[async_trait]
pub trait CollectiveApi: Send + Sync {
    /// Create (or look up) a user account.
    async fn create_user(&self, user: &UserInput) -> Result<CreatedUser, ApiError>;

    /// Create a collective, event, or organization.
    async fn create_collective(
        &self,
        collective: &CollectiveInput,
    ) -> Result<CreatedEntity, ApiError>;

    /// Replace the core contributors (admins) of a collective.
    async fn edit_core_contributors(
        &self,
        collective_id: i64,
        members: &[MemberInput],
    ) -> Result<CollectiveMembers, ApiError>;

    /// Refresh the "current viewer" query so memberships reflect recent edits.
    async fn refetch_logged_in_user(&self) -> Result<(), ApiError>;
}

/// Send a create request through the matching mutation and unwrap the
/// created account. Users are unwrapped to their collective profile.
pub async fn create_entity(
    api: &dyn CollectiveApi,
    request: &CreateRequest,
) -> Result<CreatedEntity, ApiError> {
    match request {
        CreateRequest::User(user) => api.create_user(user).await.map(|u| u.collective),
        CreateRequest::Collective(collective) => api.create_collective(collective).await,
    }
}
