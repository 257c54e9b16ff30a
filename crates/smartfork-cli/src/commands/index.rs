//! Index command - add transcripts to the session index

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::{Cli, OutputFormat};
use crate::output::colors;
use crate::service::{IndexOutcome, SessionService};

pub fn run(
    cli: &Cli,
    service: &mut SessionService,
    path: Option<&Path>,
    all: bool,
) -> Result<()> {
    match (path, all) {
        (Some(path), false) => run_single(cli, service, path),
        (None, true) => run_all(cli, service),
        (Some(_), true) => bail!("pass a transcript path or --all, not both"),
        (None, false) => bail!("nothing to index: pass a transcript path or --all"),
    }
}

fn run_single(cli: &Cli, service: &mut SessionService, path: &Path) -> Result<()> {
    let outcome = service.index_file(path)?;

    match cli.format {
        OutputFormat::Human => match &outcome {
            IndexOutcome::Indexed(summary) => {
                println!(
                    "{}",
                    colors::success(&format!(
                        "Indexed {} ({})",
                        summary.session_id, summary.topic
                    ))
                );
            }
            IndexOutcome::NothingToIndex => {
                println!(
                    "{}",
                    colors::warning(&format!("Nothing to index in {}", path.display()))
                );
            }
        },
        OutputFormat::Json => {
            let output = match &outcome {
                IndexOutcome::Indexed(summary) => serde_json::json!({
                    "status": "indexed",
                    "session_id": summary.session_id,
                }),
                IndexOutcome::NothingToIndex => serde_json::json!({
                    "status": "nothing_to_index",
                    "path": path.display().to_string(),
                }),
            };
            println!("{}", output);
        }
    }

    Ok(())
}

fn run_all(cli: &Cli, service: &mut SessionService) -> Result<()> {
    let report = service.index_all();

    match cli.format {
        OutputFormat::Human => {
            println!(
                "{}",
                colors::success(&format!(
                    "Indexed {} of {} transcripts ({} empty, {} failed)",
                    report.sessions_indexed,
                    report.files_seen,
                    report.files_skipped,
                    report.files_failed
                ))
            );
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "files_seen": report.files_seen,
                "sessions_indexed": report.sessions_indexed,
                "files_skipped": report.files_skipped,
                "files_failed": report.files_failed,
            });
            println!("{}", output);
        }
    }

    Ok(())
}
