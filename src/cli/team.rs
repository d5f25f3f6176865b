//! `team` subcommands

use clap::{Args, Subcommand};
use serde_json::{json, Value};

use crate::domain::team::{Team, TeamError};
use crate::infrastructure::team::TeamOptions;
use crate::state::AppState;

#[derive(Subcommand, Debug)]
pub enum TeamCommand {
    /// Create a team managed by its creator
    Create(CreateArgs),

    /// Change slug and name; `--usernames` replaces pending invitations
    Define(DefineArgs),

    /// Show a team with its memberships and managers
    Show { slug: String },

    /// List teams ordered by slug
    List,

    /// Delete a team together with its memberships
    Delete { slug: String },

    /// Invite users, e.g. `recruit rocket "alice, bob" mary-jane`
    Recruit {
        slug: String,
        #[arg(required = true)]
        usernames: Vec<String>,
    },

    /// Confirm a pending invitation
    Confirm { slug: String, username: String },

    /// Remove a user from the team
    Dismiss { slug: String, username: String },

    /// Grant management of the team
    Manage { slug: String, username: String },

    /// Whether a user is the creator or a confirmed member
    Includes { slug: String, username: String },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub creator: String,

    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    /// Users to invite
    #[arg(long, num_args = 1..)]
    pub usernames: Option<Vec<String>>,
}

#[derive(Args, Debug)]
pub struct DefineArgs {
    /// Current slug of the team
    pub team: String,

    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, num_args = 0..)]
    pub usernames: Option<Vec<String>>,
}

impl From<CreateArgs> for TeamOptions {
    fn from(args: CreateArgs) -> Self {
        Self {
            slug: args.slug,
            name: args.name,
            usernames: args.usernames,
        }
    }
}

impl From<DefineArgs> for TeamOptions {
    fn from(args: DefineArgs) -> Self {
        Self {
            slug: args.slug,
            name: args.name,
            usernames: args.usernames,
        }
    }
}

pub async fn execute(state: &AppState, command: TeamCommand) -> anyhow::Result<Value> {
    let teams = &state.teams;

    let value = match command {
        TeamCommand::Create(args) => {
            let creator = args.creator.clone();
            to_json(teams.create_for(&creator, args.into()).await?)?
        }
        TeamCommand::Define(args) => {
            let slug = args.team.clone();
            to_json(teams.define_with(&slug, args.into()).await?)?
        }
        TeamCommand::Show { slug } => match teams.find_by_slug(&slug).await? {
            Some(team) => to_json(team)?,
            None => return Err(TeamError::team_not_found(slug).into()),
        },
        TeamCommand::List => json!({ "teams": teams.list().await? }),
        TeamCommand::Delete { slug } => {
            let deleted = teams.delete(&slug).await?;
            json!({ "slug": slug, "deleted": deleted })
        }
        TeamCommand::Recruit { slug, usernames } => to_json(teams.recruit(&slug, usernames).await?)?,
        TeamCommand::Confirm { slug, username } => to_json(teams.confirm(&slug, &username).await?)?,
        TeamCommand::Dismiss { slug, username } => to_json(teams.dismiss(&slug, &username).await?)?,
        TeamCommand::Manage { slug, username } => {
            to_json(teams.managed_by(&slug, &username).await?)?
        }
        TeamCommand::Includes { slug, username } => {
            let included = teams.includes(&slug, &username).await?;
            let managed = teams.is_managed_by(&slug, &username).await?;
            json!({
                "slug": slug,
                "username": username,
                "included": included,
                "manager": managed,
            })
        }
    };

    Ok(value)
}

fn to_json(team: Team) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(team)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn state_with_users(usernames: &[&str]) -> AppState {
        let state = crate::create_app_state().await.unwrap();
        for name in usernames {
            state.users.register(name).await.unwrap();
        }
        state
    }

    fn create(creator: &str, slug: Option<&str>, name: Option<&str>) -> TeamCommand {
        TeamCommand::Create(CreateArgs {
            creator: creator.into(),
            slug: slug.map(String::from),
            name: name.map(String::from),
            usernames: None,
        })
    }

    #[tokio::test]
    async fn test_create_and_show() {
        let state = state_with_users(&["owner"]).await;

        let created = execute(&state, create("owner", None, Some("Rocket Team")))
            .await
            .unwrap();
        assert_eq!(created["slug"], "rocket-team");

        let shown = execute(&state, TeamCommand::Show { slug: "ROCKET-TEAM".into() })
            .await
            .unwrap();
        assert_eq!(shown["name"], "Rocket Team");
    }

    #[tokio::test]
    async fn test_show_missing_team() {
        let state = state_with_users(&[]).await;

        let err = execute(&state, TeamCommand::Show { slug: "nope".into() })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Team 'nope' not found");
    }

    #[tokio::test]
    async fn test_membership_commands() {
        let state = state_with_users(&["owner", "alice"]).await;
        execute(&state, create("owner", Some("rocket"), None))
            .await
            .unwrap();

        execute(
            &state,
            TeamCommand::Recruit {
                slug: "rocket".into(),
                usernames: vec!["alice".into()],
            },
        )
        .await
        .unwrap();
        execute(
            &state,
            TeamCommand::Confirm {
                slug: "rocket".into(),
                username: "alice".into(),
            },
        )
        .await
        .unwrap();

        let result = execute(
            &state,
            TeamCommand::Includes {
                slug: "rocket".into(),
                username: "alice".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(result["included"], true);
        assert_eq!(result["manager"], false);

        let result = execute(&state, TeamCommand::Delete { slug: "rocket".into() })
            .await
            .unwrap();
        assert_eq!(result["deleted"], true);
    }
}
