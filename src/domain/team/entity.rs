//! Team aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::TeamError;
use super::management::ManagementRegistry;
use super::membership::MembershipLedger;
use super::slug::{normalize_slug, slug_key};
use super::validation::{is_blank, validate_team_id, TeamValidationError};
use crate::domain::user::{User, UserId};

/// Team identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    /// Create a new TeamId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, TeamValidationError> {
        let id = id.into();
        validate_team_id(&id)?;
        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team entity
///
/// `slug` and `name` are stored as given until [`Team::prepare`] runs the
/// validation pipeline; a persisted team always has a normalized slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    #[serde(skip_serializing_if = "Option::is_none")]
    slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    creator_id: UserId,
    #[serde(default)]
    memberships: MembershipLedger,
    #[serde(default)]
    managers: ManagementRegistry,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a team owned by `creator`, who is granted management right away
    pub fn created_by(creator: &User) -> Self {
        let now = Utc::now();
        let mut managers = ManagementRegistry::new();
        managers.grant(creator);

        Self {
            id: TeamId::generate(),
            slug: None,
            name: None,
            creator_id: creator.id().clone(),
            memberships: MembershipLedger::new(),
            managers,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set slug and name as given; `invitees` replaces the unconfirmed set
    ///
    /// Normalization and defaulting are deferred to [`Team::prepare`].
    pub fn define_with(
        &mut self,
        slug: Option<String>,
        name: Option<String>,
        invitees: Option<Vec<User>>,
    ) -> &mut Self {
        self.slug = slug;
        self.name = name;

        if let Some(users) = invitees {
            self.memberships.replace_unconfirmed(users);
        }

        self.touch();
        self
    }

    /// Invite users who hold no membership yet
    pub fn recruit(&mut self, users: Vec<User>) -> usize {
        let added = self.memberships.recruit(users);

        if added > 0 {
            self.touch();
        }
        added
    }

    /// Turn the user's pending invitation into a confirmed membership
    pub fn confirm(&mut self, user: &User) -> Result<(), TeamError> {
        if !self.memberships.confirm(user.id()) {
            return Err(TeamError::confirmation_not_found(user.username()));
        }

        self.touch();
        Ok(())
    }

    /// Drop the user from both sets; absent users are ignored
    pub fn dismiss(&mut self, user: &User) -> bool {
        let removed = self.memberships.dismiss(user.id());

        if removed {
            self.touch();
        }
        removed
    }

    /// Grant management to `user` unless already granted
    pub fn managed_by(&mut self, user: &User) -> bool {
        let granted = self.managers.grant(user);

        if granted {
            self.touch();
        }
        granted
    }

    pub fn is_managed_by(&self, user: &User) -> bool {
        self.managers.is_managed_by(user.id())
    }

    /// The creator and confirmed members are part of the team
    pub fn includes(&self, user: &User) -> bool {
        self.creator_id == *user.id() || self.memberships.is_member(user.id())
    }

    /// Validation pipeline run before every write
    ///
    /// Order matters: the default name is taken from the raw slug, the default
    /// slug from the raw name, and only then is the slug normalized.
    pub fn prepare(&mut self) -> Result<(), TeamValidationError> {
        if is_blank(self.name.as_deref()) {
            self.name = self.slug.clone();
        }

        if self.slug.is_none() {
            self.slug = self.name.clone();
        }

        if let Some(slug) = self.slug.as_deref() {
            self.slug = Some(normalize_slug(slug));
        }

        match self.slug.as_deref() {
            Some(slug) if !slug.is_empty() => Ok(()),
            _ => Err(TeamValidationError::MissingSlug),
        }
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Case-insensitive comparison form of the slug
    pub fn slug_key(&self) -> Option<String> {
        self.slug.as_deref().map(slug_key)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn creator_id(&self) -> &UserId {
        &self.creator_id
    }

    pub fn memberships(&self) -> &MembershipLedger {
        &self.memberships
    }

    pub fn members(&self) -> Vec<&User> {
        self.memberships.members()
    }

    pub fn unconfirmed_members(&self) -> Vec<&User> {
        self.memberships.unconfirmed_members()
    }

    pub fn all_members(&self) -> Vec<&User> {
        self.memberships.all_members()
    }

    pub fn usernames(&self) -> Vec<&str> {
        self.memberships.usernames()
    }

    pub fn managers(&self) -> Vec<&User> {
        self.managers.managers()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
