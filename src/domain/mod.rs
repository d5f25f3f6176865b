//! Domain layer - pure types, validation rules and collaborator traits

pub mod error;
pub mod storage;
pub mod team;
pub mod user;

pub use error::DomainError;
