//! `batch` command: one command per input line

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use super::{execute, Cli};
use crate::state::AppState;

/// Run every command in `input`, handing each result to `emit`
///
/// Arguments are split with shell quoting rules; blank lines and lines
/// starting with `#` are skipped. The first failing line stops the run.
pub async fn run<R, F>(state: &AppState, input: R, mut emit: F) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(Value) -> anyhow::Result<()>,
{
    let mut lines = input.lines();
    let mut number = 0usize;

    while let Some(line) = lines.next_line().await? {
        number += 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        debug!(line = number, command = %line, "Running batch command");

        let args = shlex::split(line)
            .with_context(|| format!("line {}: unbalanced quotes", number))?;
        let cli = Cli::try_parse_from(std::iter::once("team-roster".to_string()).chain(args))
            .with_context(|| format!("line {}: invalid command", number))?;
        let output = execute(state, cli.command)
            .await
            .with_context(|| format!("line {}: {}", number, line))?;

        emit(output)?;
    }

    Ok(())
}
