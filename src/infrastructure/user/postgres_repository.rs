//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::violated_unique_constraint;

/// Unique constraint on `users.username`
const USERNAME_CONSTRAINT: &str = "users_username_key";

/// PostgreSQL implementation of UserRepository
///
/// Username uniqueness is a table constraint, so it holds across processes.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the users table
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        info!("Ensuring users schema");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id VARCHAR(64) PRIMARY KEY,
                username VARCHAR(50) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CONSTRAINT users_username_key UNIQUE (username)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT id, username, created_at FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user by username: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_in_usernames(&self, usernames: &[String]) -> Result<Vec<User>, DomainError> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query("SELECT id, username, created_at FROM users WHERE username = ANY($1)")
            .bind(usernames)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find users: {}", e)))?;

        let found = rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()?;
        Ok(in_given_order(usernames, found))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query("INSERT INTO users (id, username, created_at) VALUES ($1, $2, $3)")
            .bind(user.id().as_str())
            .bind(user.username())
            .bind(user.created_at())
            .execute(&self.pool)
            .await
            .map_err(|e| match violated_unique_constraint(&e) {
                Some(constraint) => create_conflict(&constraint, &user),
                None => DomainError::storage(format!("Failed to create user: {}", e)),
            })?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query("SELECT id, username, created_at FROM users ORDER BY username")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }
}

fn create_conflict(constraint: &str, user: &User) -> DomainError {
    if constraint == USERNAME_CONSTRAINT {
        DomainError::conflict(format!("Username '{}' already exists", user.username()))
    } else {
        DomainError::internal(format!("User with ID '{}' already exists", user.id()))
    }
}

/// Order `found` by the position of each username in `usernames`, once per user
fn in_given_order(usernames: &[String], found: Vec<User>) -> Vec<User> {
    let mut ordered: Vec<User> = Vec::with_capacity(found.len());

    for username in usernames {
        if ordered.iter().any(|u| u.username() == username) {
            continue;
        }
        if let Some(user) = found.iter().find(|u| u.username() == username) {
            ordered.push(user.clone());
        }
    }

    ordered
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: String = row.get("id");
    let username: String = row.get("username");
    let created_at: DateTime<Utc> = row.get("created_at");

    let id = UserId::new(id).map_err(|e| DomainError::storage(format!("Invalid stored user id: {}", e)))?;
    User::restore(id, username, created_at)
        .map_err(|e| DomainError::storage(format!("Invalid stored user: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_in_given_order() {
        let found = vec![
            User::new("alice").unwrap(),
            User::new("bob").unwrap(),
            User::new("carol").unwrap(),
        ];

        let ordered = in_given_order(&strings(&["carol", "ghost", "alice", "carol"]), found);
        let names: Vec<&str> = ordered.iter().map(|u| u.username()).collect();

        assert_eq!(names, vec!["carol", "alice"]);
    }

    #[test]
    fn test_create_conflict_by_constraint() {
        let user = User::new("alice").unwrap();

        let err = create_conflict(USERNAME_CONSTRAINT, &user);
        assert!(err.is_conflict());
        assert_eq!(err.to_string(), "Conflict: Username 'alice' already exists");

        let err = create_conflict("users_pkey", &user);
        assert!(matches!(err, DomainError::Internal { .. }));
    }
}
