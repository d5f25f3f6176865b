//! Team domain module
//!
//! A team has one creator, any number of managers, and confirmed and
//! unconfirmed (invited) members. Membership of a single user moves
//! `none -> unconfirmed -> confirmed -> none`; dismissal works from either
//! state and there is no way back from confirmed to unconfirmed.

mod entity;
mod error;
mod management;
mod membership;
mod repository;
mod slug;
mod validation;

pub use entity::{Team, TeamId};
pub use error::TeamError;
pub use management::{ManagementContract, ManagementRegistry};
pub use membership::{Membership, MembershipLedger};
pub use repository::TeamRepository;
pub(crate) use repository::writable_slug_key;
pub use slug::{normalize_slug, slug_key, SLUG_SEPARATOR};
pub use validation::{is_blank, validate_team_id, TeamValidationError};

#[cfg(test)]
pub use repository::MockTeamRepository;
