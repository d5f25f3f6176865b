//! In-memory team repository

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::team::{slug_key, writable_slug_key, Team, TeamId, TeamRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Tables {
    teams: HashMap<TeamId, Team>,
    /// Lowercased slug -> owning team
    slugs: HashMap<String, TeamId>,
}

/// Team repository held in process memory
///
/// The slug index lives under the same lock as the teams, so uniqueness is
/// checked and claimed in one step.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    tables: RwLock<Tables>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, DomainError> {
        self.tables
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, DomainError> {
        self.tables
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

fn slug_conflict(key: &str) -> DomainError {
    DomainError::conflict(format!("Team slug '{}' is already taken", key))
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Team>, DomainError> {
        let tables = self.read()?;

        Ok(tables
            .slugs
            .get(&slug_key(slug))
            .and_then(|id| tables.teams.get(id))
            .cloned())
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        let key = writable_slug_key(&team)?;
        let mut tables = self.write()?;

        if tables.teams.contains_key(team.id()) {
            return Err(DomainError::internal(format!(
                "Team '{}' already exists",
                team.id()
            )));
        }

        if tables.slugs.contains_key(&key) {
            return Err(slug_conflict(&key));
        }

        tables.slugs.insert(key, team.id().clone());
        tables.teams.insert(team.id().clone(), team.clone());
        Ok(team)
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        let key = writable_slug_key(&team)?;
        let mut tables = self.write()?;

        let previous_key = match tables.teams.get(team.id()) {
            Some(existing) => existing.slug_key(),
            None => {
                return Err(DomainError::not_found(format!(
                    "Team '{}' not found",
                    team.id()
                )));
            }
        };

        if tables.slugs.get(&key).is_some_and(|owner| owner != team.id()) {
            return Err(slug_conflict(&key));
        }

        if let Some(previous_key) = previous_key {
            tables.slugs.remove(&previous_key);
        }
        tables.slugs.insert(key, team.id().clone());
        tables.teams.insert(team.id().clone(), team.clone());
        Ok(team)
    }

    async fn delete(&self, id: &TeamId) -> Result<bool, DomainError> {
        let mut tables = self.write()?;

        match tables.teams.remove(id) {
            Some(team) => {
                if let Some(key) = team.slug_key() {
                    tables.slugs.remove(&key);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let mut teams: Vec<Team> = self.read()?.teams.values().cloned().collect();
        teams.sort_by(|a, b| a.slug().cmp(&b.slug()));
        Ok(teams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::User;

    fn prepared(slug: &str) -> Team {
        let mut team = Team::created_by(&User::new("owner").unwrap());
        team.define_with(Some(slug.to_string()), None, None);
        team.prepare().unwrap();
        team
    }

    #[tokio::test]
    async fn test_create_and_find_by_slug_ignoring_case() {
        let repo = InMemoryTeamRepository::new();
        let team = repo.create(prepared("Team-Alpha")).await.unwrap();

        let found = repo.find_by_slug("TEAM-alpha").await.unwrap().unwrap();
        assert_eq!(found.id(), team.id());
        assert!(repo.find_by_slug("team-beta").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_taken_slug() {
        let repo = InMemoryTeamRepository::new();
        repo.create(prepared("rocket")).await.unwrap();

        let mut other = Team::created_by(&User::new("someone").unwrap());
        other.define_with(Some("rocket".into()), None, None);
        other.prepare().unwrap();

        let err = repo.create(other).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_same_id_is_not_a_slug_conflict() {
        let repo = InMemoryTeamRepository::new();
        let team = repo.create(prepared("rocket")).await.unwrap();

        let mut again = team.clone();
        again.define_with(Some("comet".into()), None, None);
        again.prepare().unwrap();

        let err = repo.create(again).await.unwrap_err();
        assert!(!err.is_conflict());
        assert!(matches!(err, DomainError::Internal { .. }));
        assert!(repo.find_by_slug("comet").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_requires_prepared_team() {
        let repo = InMemoryTeamRepository::new();
        let team = Team::created_by(&User::new("owner").unwrap());

        let err = repo.create(team).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_can_keep_or_change_slug() {
        let repo = InMemoryTeamRepository::new();
        let mut team = repo.create(prepared("rocket")).await.unwrap();

        team = repo.update(team).await.unwrap();

        team.define_with(Some("space-ship".into()), None, None);
        team.prepare().unwrap();
        repo.update(team).await.unwrap();

        assert!(repo.find_by_slug("rocket").await.unwrap().is_none());
        assert!(repo.find_by_slug("space-ship").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_rejects_slug_of_other_team() {
        let repo = InMemoryTeamRepository::new();
        repo.create(prepared("rocket")).await.unwrap();
        let mut team = repo.create(prepared("comet")).await.unwrap();

        team.define_with(Some("ROCKET".into()), None, None);
        team.prepare().unwrap();

        let err = repo.update(team).await.unwrap_err();
        assert!(err.is_conflict());
        assert!(repo.find_by_slug("comet").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_missing_team() {
        let repo = InMemoryTeamRepository::new();
        let err = repo.update(prepared("rocket")).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_frees_slug() {
        let repo = InMemoryTeamRepository::new();
        let team = repo.create(prepared("rocket")).await.unwrap();

        assert!(repo.delete(team.id()).await.unwrap());
        assert!(!repo.delete(team.id()).await.unwrap());
        assert!(repo.find_by_slug("rocket").await.unwrap().is_none());

        repo.create(prepared("rocket")).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_sorted_by_slug() {
        let repo = InMemoryTeamRepository::new();
        repo.create(prepared("zeta")).await.unwrap();
        repo.create(prepared("alpha")).await.unwrap();

        let slugs: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .filter_map(|t| t.slug().map(String::from))
            .collect();
        assert_eq!(slugs, vec!["alpha", "zeta"]);
    }
}
