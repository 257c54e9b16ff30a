//! smart-fork - index and search past Claude Code sessions

mod cli;
mod commands;
mod hooks;
mod output;
mod service;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use service::SessionService;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Hooks exit cleanly no matter what; a broken index must never break
    // the tool that invoked the hook
    if let Command::Hook(hook_command) = &cli.command {
        match SessionService::new(cli.config()) {
            Ok(mut service) => return commands::hook::run(&mut service, hook_command),
            Err(err) => {
                warn!(%err, "hook skipped: service unavailable");
                return Ok(());
            }
        }
    }

    let mut service = SessionService::new(cli.config())?;

    match &cli.command {
        Command::Search {
            query,
            project,
            limit,
        } => commands::search::run(&cli, &service, query, project.as_deref(), *limit),

        Command::Index { path, all } => {
            commands::index::run(&cli, &mut service, path.as_deref(), *all)
        }

        Command::Show { session_id } => commands::show::run(&cli, &service, session_id),

        Command::Stats => commands::stats::run(&cli, &service),

        Command::Delete { session_id } => commands::delete::run(&cli, &mut service, session_id),

        Command::Clear { force } => commands::clear::run(&cli, &mut service, *force),

        // Handled above
        Command::Hook(_) => unreachable!(),
    }
}
