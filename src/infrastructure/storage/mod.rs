//! Storage infrastructure - backend selection, in-memory storage and PostgreSQL pooling

mod factory;
mod in_memory;
mod postgres;

pub use factory::{StorageBackend, StorageConfig, StorageType};
pub use in_memory::InMemoryStorage;
pub use postgres::PostgresConfig;
pub(crate) use postgres::violated_unique_constraint;
