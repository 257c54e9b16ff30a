//! Show command - display one indexed session

use anyhow::Result;

use crate::cli::{Cli, OutputFormat};
use crate::output::{colors, human, json};
use crate::service::SessionService;

pub fn run(cli: &Cli, service: &SessionService, session_id: &str) -> Result<()> {
    match service.get(session_id)? {
        Some(summary) => match cli.format {
            OutputFormat::Human => println!("{}", human::format_summary(&summary)),
            OutputFormat::Json => println!("{}", json::format_summary(&summary)),
        },
        None => match cli.format {
            OutputFormat::Human => {
                println!("{}", colors::warning(&format!("Session not indexed: {}", session_id)));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "status": "not_found", "session_id": session_id }));
            }
        },
    }

    Ok(())
}
