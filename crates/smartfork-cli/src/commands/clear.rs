//! Clear command - wipe the index

use anyhow::Result;

use crate::cli::{Cli, OutputFormat};
use crate::output::colors;
use crate::service::SessionService;

pub fn run(cli: &Cli, service: &mut SessionService, force: bool) -> Result<()> {
    if !force {
        match cli.format {
            OutputFormat::Human => {
                println!(
                    "{}",
                    colors::warning("This removes every indexed session; re-run with --force")
                );
            }
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "status": "refused", "hint": "--force" }));
            }
        }
        return Ok(());
    }

    let before = service.stats()?.total_sessions;
    service.clear()?;

    match cli.format {
        OutputFormat::Human => {
            println!(
                "{}",
                colors::success(&format!("Cleared {} indexed sessions", before))
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "status": "cleared", "removed": before }));
        }
    }

    Ok(())
}
