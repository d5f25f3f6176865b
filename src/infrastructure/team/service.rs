//! Team service: membership and management workflows over the repositories

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::team::{Team, TeamError, TeamRepository, TeamValidationError};
use crate::domain::user::{recruit_tokens, word_tokens, User, UserRepository};
use crate::domain::DomainError;

/// Attributes accepted when a team is created or redefined
#[derive(Debug, Clone, Default)]
pub struct TeamOptions {
    pub slug: Option<String>,
    pub name: Option<String>,
    /// Replaces every pending invitation when present, even if empty
    pub usernames: Option<Vec<String>>,
}

impl TeamOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_usernames<I, S>(mut self, usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.usernames = Some(usernames.into_iter().map(Into::into).collect());
        self
    }
}

/// Team service
///
/// Teams are addressed by slug, case-insensitively. Every write runs
/// [`Team::prepare`] first and a slug held by another team surfaces as
/// [`TeamValidationError::SlugTaken`].
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
    users: Arc<dyn UserRepository>,
}

impl TeamService {
    pub fn new(teams: Arc<dyn TeamRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { teams, users }
    }

    /// Create a team owned and managed by `creator`
    pub async fn create_for(&self, creator: &str, options: TeamOptions) -> Result<Team, TeamError> {
        info!(creator = %creator, slug = ?options.slug, "Creating team");

        let creator = self.resolve(creator).await?;
        let mut team = Team::created_by(&creator);
        self.apply(&mut team, options).await?;

        self.insert(team).await
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Team>, TeamError> {
        debug!(slug = %slug, "Looking up team");
        Ok(self.teams.find_by_slug(slug).await?)
    }

    /// Redefine slug, name and optionally the pending invitations
    pub async fn define_with(&self, slug: &str, options: TeamOptions) -> Result<Team, TeamError> {
        info!(slug = %slug, "Redefining team");

        let mut team = self.load(slug).await?;
        self.apply(&mut team, options).await?;

        self.save(team).await
    }

    /// Invite users named in free-form input such as `["alice, bob", "mary-jane"]`
    ///
    /// Unknown usernames are skipped. Input without any username leaves the
    /// team untouched.
    pub async fn recruit<I, S>(&self, slug: &str, input: I) -> Result<Team, TeamError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let usernames = recruit_tokens(input);
        let team = self.load(slug).await?;

        if usernames.is_empty() {
            debug!(slug = %slug, "Nothing to recruit");
            return Ok(team);
        }

        let users = self.users.find_in_usernames(&usernames).await?;
        self.recruit_users(team, users).await
    }

    /// Invite already resolved users
    pub async fn recruit_users(&self, mut team: Team, users: Vec<User>) -> Result<Team, TeamError> {
        let added = team.recruit(users);
        info!(team = %team.id(), added, "Recruited users");

        self.save(team).await
    }

    /// Accept the pending invitation of `username`
    pub async fn confirm(&self, slug: &str, username: &str) -> Result<Team, TeamError> {
        let mut team = self.load(slug).await?;
        let user = self.resolve(username).await?;

        if let Err(e) = team.confirm(&user) {
            warn!(slug = %slug, username = %username, "No invitation to confirm");
            return Err(e);
        }

        info!(slug = %slug, username = %username, "Confirmed membership");
        self.save(team).await
    }

    /// Remove `username` from the team; a non-member is a no-op
    pub async fn dismiss(&self, slug: &str, username: &str) -> Result<Team, TeamError> {
        let mut team = self.load(slug).await?;
        let user = self.resolve(username).await?;

        if !team.dismiss(&user) {
            debug!(slug = %slug, username = %username, "User was not on the team");
            return Ok(team);
        }

        info!(slug = %slug, username = %username, "Dismissed user");
        self.save(team).await
    }

    /// Grant management of the team to `username`
    pub async fn managed_by(&self, slug: &str, username: &str) -> Result<Team, TeamError> {
        let mut team = self.load(slug).await?;
        let user = self.resolve(username).await?;

        if !team.managed_by(&user) {
            debug!(slug = %slug, username = %username, "Already a manager");
            return Ok(team);
        }

        info!(slug = %slug, username = %username, "Granted management");
        self.save(team).await
    }

    /// Unknown users manage nothing
    pub async fn is_managed_by(&self, slug: &str, username: &str) -> Result<bool, TeamError> {
        let team = self.load(slug).await?;

        Ok(match self.users.get_by_username(username).await? {
            Some(user) => team.is_managed_by(&user),
            None => false,
        })
    }

    /// Creator or confirmed member; unknown users are never included
    pub async fn includes(&self, slug: &str, username: &str) -> Result<bool, TeamError> {
        let team = self.load(slug).await?;

        Ok(match self.users.get_by_username(username).await? {
            Some(user) => team.includes(&user),
            None => false,
        })
    }

    pub async fn members(&self, slug: &str) -> Result<Vec<User>, TeamError> {
        let team = self.load(slug).await?;
        Ok(team.members().into_iter().cloned().collect())
    }

    pub async fn unconfirmed_members(&self, slug: &str) -> Result<Vec<User>, TeamError> {
        let team = self.load(slug).await?;
        Ok(team.unconfirmed_members().into_iter().cloned().collect())
    }

    pub async fn all_members(&self, slug: &str) -> Result<Vec<User>, TeamError> {
        let team = self.load(slug).await?;
        Ok(team.all_members().into_iter().cloned().collect())
    }

    /// Usernames of confirmed members
    pub async fn usernames(&self, slug: &str) -> Result<Vec<String>, TeamError> {
        let team = self.load(slug).await?;
        Ok(team.usernames().into_iter().map(String::from).collect())
    }

    pub async fn list(&self) -> Result<Vec<Team>, TeamError> {
        Ok(self.teams.list().await?)
    }

    /// Delete a team with its memberships and management contracts
    pub async fn delete(&self, slug: &str) -> Result<bool, TeamError> {
        info!(slug = %slug, "Deleting team");

        match self.teams.find_by_slug(slug).await? {
            Some(team) => Ok(self.teams.delete(team.id()).await?),
            None => Ok(false),
        }
    }

    async fn load(&self, slug: &str) -> Result<Team, TeamError> {
        self.teams
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| TeamError::team_not_found(slug))
    }

    async fn resolve(&self, username: &str) -> Result<User, TeamError> {
        self.users
            .get_by_username(username)
            .await?
            .ok_or_else(|| TeamError::user_not_found(username))
    }

    async fn apply(&self, team: &mut Team, options: TeamOptions) -> Result<(), TeamError> {
        let invitees = match options.usernames {
            Some(input) => {
                let usernames = word_tokens(input);
                Some(self.users.find_in_usernames(&usernames).await?)
            }
            None => None,
        };

        team.define_with(options.slug, options.name, invitees);
        Ok(())
    }

    async fn insert(&self, mut team: Team) -> Result<Team, TeamError> {
        team.prepare()?;
        let slug = team.slug().unwrap_or_default().to_string();

        self.teams
            .create(team)
            .await
            .map_err(|e| write_error(slug, e))
    }

    async fn save(&self, mut team: Team) -> Result<Team, TeamError> {
        team.prepare()?;
        let slug = team.slug().unwrap_or_default().to_string();

        self.teams
            .update(team)
            .await
            .map_err(|e| write_error(slug, e))
    }
}

fn write_error(slug: String, error: DomainError) -> TeamError {
    if error.is_conflict() {
        warn!(slug = %slug, "Slug already taken");
        TeamValidationError::SlugTaken(slug).into()
    } else {
        error.into()
    }
}
