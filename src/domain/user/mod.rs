//! User domain
//!
//! Users are the people teams invite, confirm and grant management to. The
//! team core only needs to resolve usernames to users; everything else about
//! accounts lives outside this crate.

mod entity;
mod repository;
mod tokens;
mod validation;

pub use entity::{User, UserId};
pub use repository::UserRepository;
pub use tokens::{recruit_tokens, word_tokens};
pub use validation::{validate_user_id, validate_username, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
