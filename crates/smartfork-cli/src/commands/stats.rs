//! Stats command - index statistics

use anyhow::Result;

use crate::cli::{Cli, OutputFormat};
use crate::output::{human, json};
use crate::service::SessionService;

pub fn run(cli: &Cli, service: &SessionService) -> Result<()> {
    let stats = service.stats()?;

    match cli.format {
        OutputFormat::Human => println!("{}", human::format_stats(&stats)),
        OutputFormat::Json => println!("{}", json::format_stats(&stats)),
    }

    Ok(())
}
