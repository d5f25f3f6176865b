//! Manager privileges for a team

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::{User, UserId};

/// Grants a user manager privilege; independent of membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagementContract {
    user: User,
    granted_at: DateTime<Utc>,
}

impl ManagementContract {
    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn granted_at(&self) -> DateTime<Utc> {
        self.granted_at
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManagementRegistry {
    contracts: Vec<ManagementContract>,
}

impl ManagementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_managed_by(&self, user_id: &UserId) -> bool {
        self.contracts.iter().any(|c| c.user.id() == user_id)
    }

    /// Grant management unless already held; returns whether a contract was added
    pub fn grant(&mut self, user: &User) -> bool {
        if self.is_managed_by(user.id()) {
            return false;
        }

        self.contracts.push(ManagementContract {
            user: user.clone(),
            granted_at: Utc::now(),
        });
        true
    }

    pub fn managers(&self) -> Vec<&User> {
        self.contracts.iter().map(|c| &c.user).collect()
    }

    pub fn contracts(&self) -> &[ManagementContract] {
        &self.contracts
    }
}
