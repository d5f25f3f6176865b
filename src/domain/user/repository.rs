//! User directory trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::User;
use crate::domain::DomainError;

/// Resolves usernames to users
///
/// Username matching is exact and case-sensitive. Unknown usernames resolve to
/// nothing rather than an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Get every user whose username is in `usernames`, each at most once
    async fn find_in_usernames(&self, usernames: &[String]) -> Result<Vec<User>, DomainError>;

    /// Register a new user, rejecting a taken username with a conflict
    ///
    /// Uniqueness must hold across processes sharing the same store.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// List all users
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}
