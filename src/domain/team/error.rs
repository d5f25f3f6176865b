//! Team operation errors

use thiserror::Error;

use super::validation::TeamValidationError;
use crate::domain::DomainError;

/// Errors returned by team operations
///
/// Collaborator failures travel through `Domain` untouched.
#[derive(Debug, Error)]
pub enum TeamError {
    #[error(transparent)]
    Validation(#[from] TeamValidationError),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("No pending invitation for user '{0}'")]
    ConfirmationNotFound(String),

    #[error("Team '{0}' not found")]
    TeamNotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl TeamError {
    pub fn user_not_found(username: impl Into<String>) -> Self {
        Self::UserNotFound(username.into())
    }

    pub fn confirmation_not_found(username: impl Into<String>) -> Self {
        Self::ConfirmationNotFound(username.into())
    }

    pub fn team_not_found(slug: impl Into<String>) -> Self {
        Self::TeamNotFound(slug.into())
    }
}
