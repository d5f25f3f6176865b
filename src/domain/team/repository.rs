//! Team repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Team, TeamId};
use crate::domain::DomainError;

/// Durable storage for teams together with their memberships and managers
///
/// Implementations own slug uniqueness: `create` and `update` must reject a
/// team whose lowercased slug is held by a different team with
/// [`DomainError::Conflict`], atomically with the write. Deleting a team
/// removes its memberships and management contracts with it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Case-insensitive slug lookup
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Team>, DomainError>;

    /// Insert a prepared team
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Replace an existing prepared team
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// Delete a team by ID
    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError>;

    /// List all teams ordered by slug
    async fn list(&self) -> Result<Vec<Team>, DomainError>;
}

/// Slug key of a team about to be written, or a validation error if it was never prepared
pub(crate) fn writable_slug_key(team: &Team) -> Result<String, DomainError> {
    team.slug_key()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| DomainError::validation(format!("Team '{}' has no slug", team.id())))
}
