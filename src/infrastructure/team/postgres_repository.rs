//! PostgreSQL team repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::domain::team::{slug_key, writable_slug_key, Team, TeamId, TeamRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::violated_unique_constraint;

/// Case-insensitive unique index on `teams.slug`
const SLUG_INDEX: &str = "teams_slug_lower_key";

/// PostgreSQL implementation of TeamRepository
///
/// Memberships and management contracts are stored inside the team document,
/// so they disappear with the row. Slug uniqueness is a unique index on
/// `LOWER(slug)`.
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the teams table and its case-insensitive slug index
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        info!("Ensuring teams schema");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS teams (
                id VARCHAR(64) PRIMARY KEY,
                slug VARCHAR(255) NOT NULL,
                creator_id VARCHAR(64) NOT NULL,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create teams table: {}", e)))?;

        sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS teams_slug_lower_key ON teams (LOWER(slug))")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create slug index: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query("SELECT data FROM teams WHERE LOWER(slug) = $1")
            .bind(slug_key(slug))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find team by slug: {}", e)))?;

        row.as_ref().map(row_to_team).transpose()
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        let key = writable_slug_key(&team)?;
        let data = team_to_json(&team)?;

        sqlx::query(
            r#"
            INSERT INTO teams (id, slug, creator_id, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(team.id().as_str())
        .bind(team.slug())
        .bind(team.creator_id().as_str())
        .bind(&data)
        .bind(team.created_at())
        .bind(team.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| match violated_unique_constraint(&e) {
            Some(constraint) => unique_violation(&constraint, &key, &team),
            None => DomainError::storage(format!("Failed to create team: {}", e)),
        })?;

        Ok(team)
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        let key = writable_slug_key(&team)?;
        let data = team_to_json(&team)?;

        let result = sqlx::query(
            r#"
            UPDATE teams
            SET slug = $2, data = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(team.id().as_str())
        .bind(team.slug())
        .bind(&data)
        .bind(team.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| match violated_unique_constraint(&e) {
            Some(constraint) => unique_violation(&constraint, &key, &team),
            None => DomainError::storage(format!("Failed to update team: {}", e)),
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team.id()
            )));
        }

        Ok(team)
    }

    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete team: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query("SELECT data FROM teams ORDER BY slug")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list teams: {}", e)))?;

        rows.iter().map(row_to_team).collect()
    }
}

/// Only the slug index means the slug is taken; any other clash is an id collision
fn unique_violation(constraint: &str, key: &str, team: &Team) -> DomainError {
    if constraint == SLUG_INDEX {
        DomainError::conflict(format!("Team slug '{}' is already taken", key))
    } else {
        DomainError::internal(format!("Team '{}' already exists", team.id()))
    }
}

fn team_to_json(team: &Team) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(team)
        .map_err(|e| DomainError::storage(format!("Failed to serialize team: {}", e)))
}

fn row_to_team(row: &PgRow) -> Result<Team, DomainError> {
    let data: serde_json::Value = row.get("data");
    serde_json::from_value(data)
        .map_err(|e| DomainError::storage(format!("Failed to deserialize team: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::User;

    #[test]
    fn test_unique_violation_by_constraint() {
        let mut team = Team::created_by(&User::new("owner").unwrap());
        team.define_with(Some("Rocket".into()), None, None);
        team.prepare().unwrap();

        let err = unique_violation(SLUG_INDEX, "rocket", &team);
        assert!(err.is_conflict());
        assert_eq!(err.to_string(), "Conflict: Team slug 'rocket' is already taken");

        let err = unique_violation("teams_pkey", "rocket", &team);
        assert!(!err.is_conflict());
        assert!(matches!(err, DomainError::Internal { .. }));
    }

    #[test]
    fn test_team_json_roundtrip() {
        let mut team = Team::created_by(&User::new("owner").unwrap());
        team.define_with(Some("rocket".into()), Some("Rocket".into()), None);
        team.prepare().unwrap();

        let data = team_to_json(&team).unwrap();
        let back: Team = serde_json::from_value(data).unwrap();

        assert_eq!(back.id(), team.id());
        assert_eq!(back.name(), Some("Rocket"));
    }
}
