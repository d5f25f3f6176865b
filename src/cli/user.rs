//! `user` subcommands

use clap::Subcommand;
use serde_json::{json, Value};

use crate::state::AppState;

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Register a user
    Add { username: String },

    /// List users ordered by username
    List,
}

pub async fn execute(state: &AppState, command: UserCommand) -> anyhow::Result<Value> {
    match command {
        UserCommand::Add { username } => {
            let user = state.users.register(&username).await?;
            Ok(serde_json::to_value(user)?)
        }
        UserCommand::List => {
            let users = state.users.list().await?;
            Ok(json!({ "users": users }))
        }
    }
}
