//! Human-readable formatting for summaries, results, and stats

use smartfork_core::{SearchResult, SessionSummary};
use smartfork_store::StorageStats;

use crate::output::colors;

/// Format one search result as an indented block
pub fn format_search_result(position: usize, result: &SearchResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}. {}  [{}]\n",
        position,
        colors::topic(&result.summary.topic),
        colors::session_id(&result.session_id)
    ));
    out.push_str(&format!(
        "   {} {}",
        colors::label("Project:"),
        colors::value(&result.summary.project_path)
    ));
    if let Some(branch) = &result.summary.git_branch {
        out.push_str(&format!("  {} {}", colors::label("Branch:"), colors::value(branch)));
    }
    out.push('\n');
    if !result.summary.technologies.is_empty() {
        out.push_str(&format!(
            "   {} {}\n",
            colors::label("Tech:"),
            colors::value(&result.summary.technologies.join(", "))
        ));
    }
    out.push_str(&format!(
        "   {} {}  ({} messages, {:.1} min)\n",
        colors::label("Outcome:"),
        colors::value(&result.summary.outcome),
        result.summary.message_count,
        result.summary.duration_minutes
    ));
    out.push_str(&format!(
        "   {} {}\n",
        colors::label("Fork:"),
        colors::fork_command(&result.fork_command())
    ));
    out
}

/// Format a full summary, one field per line
pub fn format_summary(summary: &SessionSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", colors::header(&summary.topic)));
    out.push_str(&format!(
        "  {} {}\n",
        colors::label("Session:"),
        colors::session_id(&summary.session_id)
    ));
    out.push_str(&format!(
        "  {} {}\n",
        colors::label("Project:"),
        colors::value(&summary.project_path)
    ));
    if let Some(branch) = &summary.git_branch {
        out.push_str(&format!("  {} {}\n", colors::label("Branch:"), colors::value(branch)));
    }
    out.push_str(&format!(
        "  {} {}\n",
        colors::label("Outcome:"),
        colors::value(&summary.outcome)
    ));
    out.push_str(&format!(
        "  {} {} messages over {:.1} minutes\n",
        colors::label("Length:"),
        summary.message_count,
        summary.duration_minutes
    ));
    if !summary.technologies.is_empty() {
        out.push_str(&format!(
            "  {} {}\n",
            colors::label("Tech:"),
            colors::value(&summary.technologies.join(", "))
        ));
    }
    if !summary.key_decisions.is_empty() {
        out.push_str(&format!("  {}\n", colors::label("Decisions:")));
        for decision in &summary.key_decisions {
            out.push_str(&format!("    - {}\n", colors::value(decision)));
        }
    }
    if !summary.files_modified.is_empty() {
        out.push_str(&format!("  {}\n", colors::label("Files:")));
        for file in &summary.files_modified {
            out.push_str(&format!("    - {}\n", colors::value(file)));
        }
    }
    out.push_str(&format!(
        "  {} {}  {} {}\n",
        colors::label("First indexed:"),
        colors::value(&summary.created_at),
        colors::label("Updated:"),
        colors::value(&summary.last_updated)
    ));
    out
}

/// Format index statistics
pub fn format_stats(stats: &StorageStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", colors::header("Index statistics")));
    out.push_str(&format!(
        "  {} {}\n",
        colors::label("Sessions:"),
        stats.total_sessions
    ));
    out.push_str(&format!(
        "  {} {}\n",
        colors::label("Backend:"),
        colors::value(&stats.backend)
    ));
    if !stats.by_project.is_empty() {
        out.push_str(&format!("  {}\n", colors::label("By project:")));
        for (project, count) in &stats.by_project {
            out.push_str(&format!("    {:>4}  {}\n", count, colors::value(project)));
        }
    }
    out
}
