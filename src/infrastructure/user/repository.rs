//! Storage-backed user repository

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::storage::Storage;
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// UserRepository on top of any `Storage<User>` backend
///
/// Lookups scan the stored users; registrations are serialized in-process,
/// which is sufficient for the single-process in-memory backend.
#[derive(Debug)]
pub struct StorageUserRepository {
    storage: Arc<dyn Storage<User>>,
    /// Serializes registrations so the username check and insert do not interleave
    create_lock: Mutex<()>,
}

impl StorageUserRepository {
    pub fn new(storage: Arc<dyn Storage<User>>) -> Self {
        Self {
            storage,
            create_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl UserRepository for StorageUserRepository {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.storage.list().await?;
        Ok(users.into_iter().find(|u| u.username() == username))
    }

    async fn find_in_usernames(&self, usernames: &[String]) -> Result<Vec<User>, DomainError> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }

        let users = self.storage.list().await?;
        let mut found: Vec<User> = Vec::new();

        for username in usernames {
            if found.iter().any(|u| u.username() == username) {
                continue;
            }
            if let Some(user) = users.iter().find(|u| u.username() == username) {
                found.push(user.clone());
            }
        }

        Ok(found)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let _guard = self.create_lock.lock().await;

        if self.get_by_username(user.username()).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username()
            )));
        }

        self.storage.create(user).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut users = self.storage.list().await?;
        users.sort_by(|a, b| a.username().cmp(b.username()));
        Ok(users)
    }
}
