//! Shared application state

use std::sync::Arc;

use crate::infrastructure::team::TeamService;
use crate::infrastructure::user::UserService;

/// Services wired to one storage backend
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub teams: Arc<TeamService>,
}

impl AppState {
    pub fn new(users: Arc<UserService>, teams: Arc<TeamService>) -> Self {
        Self { users, teams }
    }
}
