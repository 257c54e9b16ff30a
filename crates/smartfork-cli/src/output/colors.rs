//! ANSI color helpers for terminal output

use colored::Colorize;

/// Get colored header
pub fn header(text: &str) -> String {
    text.bold().underline().to_string()
}

/// Get colored label
pub fn label(text: &str) -> String {
    text.white().dimmed().to_string()
}

/// Get colored value
pub fn value(text: &str) -> String {
    text.white().to_string()
}

/// Get colored session id
pub fn session_id(id: &str) -> String {
    id.cyan().bold().to_string()
}

/// Get colored topic line
pub fn topic(text: &str) -> String {
    text.bold().to_string()
}

/// Get colored fork command
pub fn fork_command(cmd: &str) -> String {
    cmd.green().to_string()
}

/// Get colored success message
pub fn success(text: &str) -> String {
    format!("{} {}", "✓".green(), text)
}

/// Get colored warning message
pub fn warning(text: &str) -> String {
    format!("{} {}", "⚠".yellow(), text)
}

/// Get colored error message
pub fn error(text: &str) -> String {
    format!("{} {}", "✗".red(), text)
}
