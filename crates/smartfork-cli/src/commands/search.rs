//! Search command - query the session index

use anyhow::Result;
use colored::Colorize;

use crate::cli::{Cli, OutputFormat};
use crate::output::{colors, human, json};
use crate::service::SessionService;

pub fn run(
    cli: &Cli,
    service: &SessionService,
    query: &str,
    project: Option<&str>,
    limit: usize,
) -> Result<()> {
    let results = service.search(query, project, limit)?;

    match cli.format {
        OutputFormat::Human => {
            if results.is_empty() {
                println!("No sessions found for: {}", query.cyan());
            } else {
                println!(
                    "{}",
                    colors::header(&format!("Sessions matching '{}' ({})", query, results.len()))
                );
                println!();
                for (i, result) in results.iter().enumerate() {
                    println!("{}", human::format_search_result(i + 1, result));
                }
            }
        }
        OutputFormat::Json => {
            for result in &results {
                println!("{}", json::format_search_result(result));
            }
        }
    }

    Ok(())
}
