//! Confirmed and unconfirmed team membership

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::{User, UserId};

/// One membership row: a user invited to (and possibly confirmed in) a team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    user: User,
    confirmed: bool,
    invited_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmed_at: Option<DateTime<Utc>>,
}

impl Membership {
    fn invite(user: User) -> Self {
        Self {
            user,
            confirmed: false,
            invited_at: Utc::now(),
            confirmed_at: None,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn invited_at(&self) -> DateTime<Utc> {
        self.invited_at
    }

    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }
}

/// Membership rows of a single team
///
/// The confirmed and unconfirmed sets are projections of the rows by their
/// `confirmed` flag. A user holds at most one row, so recruiting a confirmed
/// member is a no-op.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipLedger {
    rows: Vec<Membership>,
}

impl MembershipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add users to the unconfirmed set, returning how many were newly invited
    ///
    /// Users already holding a row, pending or confirmed, are skipped.
    pub fn recruit(&mut self, users: impl IntoIterator<Item = User>) -> usize {
        let mut added = 0;

        for user in users {
            if !self.holds_row(user.id()) {
                self.rows.push(Membership::invite(user));
                added += 1;
            }
        }

        added
    }

    /// Replace the whole unconfirmed set; confirmed rows are untouched
    pub fn replace_unconfirmed(&mut self, users: impl IntoIterator<Item = User>) {
        self.rows.retain(|row| row.confirmed);
        self.recruit(users);
    }

    /// Move the user's pending row to the confirmed set
    ///
    /// Returns `false` when the user has no pending row.
    pub fn confirm(&mut self, user_id: &UserId) -> bool {
        let Some(pending) = self.find(user_id, false) else {
            return false;
        };

        let row = &mut self.rows[pending];
        row.confirmed = true;
        row.confirmed_at = Some(Utc::now());
        true
    }

    /// Remove every row held by the user, returning whether any existed
    pub fn dismiss(&mut self, user_id: &UserId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.user.id() != user_id);
        self.rows.len() != before
    }

    pub fn members(&self) -> Vec<&User> {
        self.projection(true).collect()
    }

    pub fn unconfirmed_members(&self) -> Vec<&User> {
        self.projection(false).collect()
    }

    /// Usernames of confirmed members in the order they were invited
    pub fn usernames(&self) -> Vec<&str> {
        self.projection(true).map(User::username).collect()
    }

    /// Confirmed members followed by unconfirmed ones
    ///
    /// Each user is listed once even if a stored ledger holds two rows for them.
    pub fn all_members(&self) -> Vec<&User> {
        let mut all: Vec<&User> = self.members();

        for user in self.projection(false) {
            if !all.iter().any(|u| u.id() == user.id()) {
                all.push(user);
            }
        }

        all
    }

    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.find(user_id, true).is_some()
    }

    pub fn is_invited(&self, user_id: &UserId) -> bool {
        self.find(user_id, false).is_some()
    }

    pub fn rows(&self) -> &[Membership] {
        &self.rows
    }

    fn projection(&self, confirmed: bool) -> impl Iterator<Item = &User> {
        self.rows
            .iter()
            .filter(move |row| row.confirmed == confirmed)
            .map(|row| &row.user)
    }

    fn holds_row(&self, user_id: &UserId) -> bool {
        self.rows.iter().any(|row| row.user.id() == user_id)
    }

    fn find(&self, user_id: &UserId, confirmed: bool) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.confirmed == confirmed && row.user.id() == user_id)
    }
}
