//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Keyed entity store backing repositories that need no query support
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Every stored entity, in no particular order
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Stores a new entity; a taken key is a conflict
    async fn create(&self, entity: E) -> Result<E, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::storage::StorageKey;
    use std::sync::Mutex;

    /// Vec-backed storage that can be switched into a failing state
    #[derive(Debug)]
    pub struct MockStorage<E>
    where
        E: StorageEntity,
    {
        entities: Mutex<Vec<E>>,
        error: Mutex<Option<String>>,
    }

    impl<E> MockStorage<E>
    where
        E: StorageEntity,
    {
        pub fn new() -> Self {
            Self {
                entities: Mutex::new(Vec::new()),
                error: Mutex::new(None),
            }
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        fn check_error(&self) -> Result<(), DomainError> {
            match self.error.lock().unwrap().clone() {
                Some(error) => Err(DomainError::storage(error)),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl<E> Storage<E> for MockStorage<E>
    where
        E: StorageEntity + 'static,
    {
        async fn list(&self) -> Result<Vec<E>, DomainError> {
            self.check_error()?;
            Ok(self.entities.lock().unwrap().clone())
        }

        async fn create(&self, entity: E) -> Result<E, DomainError> {
            self.check_error()?;
            let mut entities = self.entities.lock().unwrap();

            if entities.iter().any(|e| e.key() == entity.key()) {
                return Err(DomainError::conflict(format!(
                    "Entity with key '{}' already exists",
                    entity.key().as_str()
                )));
            }

            entities.push(entity.clone());
            Ok(entity)
        }
    }
}
