//! Team Roster
//!
//! Team membership core:
//! - Teams addressed by a normalized, case-insensitively unique slug
//! - Invitations (unconfirmed members) that users confirm into memberships
//! - Management contracts, with the creator managing from the start
//! - In-memory or PostgreSQL storage

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod state;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

use std::sync::Arc;

use tracing::info;

use crate::domain::team::TeamRepository;
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::{InMemoryStorage, StorageBackend};
use crate::infrastructure::team::{InMemoryTeamRepository, PostgresTeamRepository, TeamService};
use crate::infrastructure::user::{PostgresUserRepository, StorageUserRepository, UserService};

/// Create application state with in-memory storage
pub async fn create_app_state() -> Result<AppState, DomainError> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create application state for the configured storage backend
pub async fn create_app_state_with_config(config: &AppConfig) -> Result<AppState, DomainError> {
    let storage_config = config.storage_config()?;
    let backend = StorageBackend::open(&storage_config).await?;

    let (users, teams): (Arc<dyn UserRepository>, Arc<dyn TeamRepository>) = match &backend {
        StorageBackend::InMemory => (
            Arc::new(StorageUserRepository::new(Arc::new(InMemoryStorage::<User>::new()))),
            Arc::new(InMemoryTeamRepository::new()),
        ),
        StorageBackend::Postgres(pool) => {
            let users = PostgresUserRepository::new(pool.clone());
            users.ensure_schema().await?;

            let teams = PostgresTeamRepository::new(pool.clone());
            teams.ensure_schema().await?;

            (Arc::new(users), Arc::new(teams))
        }
    };

    info!(backend = ?storage_config.storage_type(), "Application state ready");

    Ok(AppState::new(
        Arc::new(UserService::new(users.clone())),
        Arc::new(TeamService::new(teams, users)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::team::TeamOptions;

    #[tokio::test]
    async fn test_in_memory_state_wires_services() {
        let state = create_app_state().await.unwrap();

        state.users.register("owner").await.unwrap();
        state.users.register("alice").await.unwrap();

        state
            .teams
            .create_for("owner", TeamOptions::new().with_slug("rocket"))
            .await
            .unwrap();
        state.teams.recruit("rocket", ["alice"]).await.unwrap();
        state.teams.confirm("rocket", "alice").await.unwrap();

        assert_eq!(state.teams.usernames("rocket").await.unwrap(), vec!["alice"]);
    }
}
