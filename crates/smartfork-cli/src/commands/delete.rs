//! Delete command - remove one session from the index

use anyhow::Result;

use crate::cli::{Cli, OutputFormat};
use crate::output::colors;
use crate::service::SessionService;

pub fn run(cli: &Cli, service: &mut SessionService, session_id: &str) -> Result<()> {
    let removed = service.delete(session_id)?;

    match cli.format {
        OutputFormat::Human => {
            if removed {
                println!("{}", colors::success(&format!("Removed {}", session_id)));
            } else {
                println!(
                    "{}",
                    colors::warning(&format!("Session not indexed: {}", session_id))
                );
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "session_id": session_id, "removed": removed })
            );
        }
    }

    Ok(())
}
