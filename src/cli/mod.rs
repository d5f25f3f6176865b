//! CLI module for Team Roster
//!
//! - `user`: register and list users
//! - `team`: create teams and manage their members and managers
//! - `batch`: run commands read from stdin against one shared state

pub mod batch;
pub mod team;
pub mod user;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::state::AppState;

/// Team Roster - team membership, invitations and management
#[derive(Parser, Debug)]
#[command(name = "team-roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage users
    #[command(subcommand)]
    User(user::UserCommand),

    /// Manage teams
    #[command(subcommand)]
    Team(team::TeamCommand),

    /// Run one command per stdin line against the same state
    Batch,
}

/// Load configuration, initialise logging and run `cli`
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    let state = crate::create_app_state_with_config(&config).await?;

    match cli.command {
        Command::Batch => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            batch::run(&state, stdin, |output| print_json(&output)).await
        }
        command => {
            let output = execute(&state, command).await?;
            print_json(&output)
        }
    }
}

/// Run a single non-batch command
pub async fn execute(state: &AppState, command: Command) -> anyhow::Result<Value> {
    match command {
        Command::User(command) => user::execute(state, command).await,
        Command::Team(command) => team::execute(state, command).await,
        Command::Batch => anyhow::bail!("batch cannot be nested"),
    }
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
