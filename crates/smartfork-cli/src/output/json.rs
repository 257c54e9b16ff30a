//! JSON formatting (one object per line for lists)

use smartfork_core::{SearchResult, SessionSummary};
use smartfork_store::StorageStats;

/// One search result as a single JSON line, fork command included
pub fn format_search_result(result: &SearchResult) -> String {
    let value = serde_json::json!({
        "session_id": result.session_id,
        "score": result.score,
        "fork_command": result.fork_command(),
        "summary": result.summary,
    });
    value.to_string()
}

pub fn format_summary(summary: &SessionSummary) -> String {
    serde_json::to_string(summary).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_stats(stats: &StorageStats) -> String {
    serde_json::to_string_pretty(stats).unwrap_or_else(|_| "{}".to_string())
}
