//! Hook command - lifecycle entry points fed from stdin

use anyhow::Result;

use crate::cli::HookCommand;
use crate::hooks;
use crate::service::SessionService;

/// Dispatch a hook invocation. Always returns `Ok`: a hook failure must
/// not break the tool that invoked it.
pub fn run(service: &mut SessionService, command: &HookCommand) -> Result<()> {
    let Some(payload) = hooks::read_payload(std::io::stdin().lock()) else {
        return Ok(());
    };

    match command {
        HookCommand::SessionEnd => hooks::on_session_end(service, &payload),
        HookCommand::PromptSubmit => hooks::on_prompt_submit(service, &payload),
    }

    Ok(())
}
