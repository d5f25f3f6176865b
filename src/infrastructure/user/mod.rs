//! User infrastructure implementations

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::StorageUserRepository;
pub use service::UserService;
