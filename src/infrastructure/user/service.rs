//! User service for registration and lookup

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// User service
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Register a new user under a unique username
    pub async fn register(&self, username: &str) -> Result<User, DomainError> {
        info!(username = %username, "Registering user");

        let user = User::new(username).map_err(|e| DomainError::validation(e.to_string()))?;

        self.repository.create(user).await
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        debug!(username = %username, "Looking up user");
        self.repository.get_by_username(username).await
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::Storage;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::user::StorageUserRepository;

    fn create_service() -> UserService {
        let storage: Arc<dyn Storage<User>> = Arc::new(InMemoryStorage::<User>::new());
        UserService::new(Arc::new(StorageUserRepository::new(storage)))
    }

    #[tokio::test]
    async fn test_register_and_lookup() {
        let service = create_service();

        let user = service.register("alice").await.unwrap();
        let found = service.get_by_username("alice").await.unwrap().unwrap();

        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn test_register_invalid_username() {
        let service = create_service();

        let err = service.register("a b").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_invalid_username_skips_repository() {
        let mut repository = MockUserRepository::new();
        repository.expect_create().never();
        let service = UserService::new(Arc::new(repository));

        let err = service.register("ab").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let service = create_service();
        service.register("alice").await.unwrap();

        let err = service.register("alice").await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(service.list().await.unwrap().len(), 1);
    }
}
