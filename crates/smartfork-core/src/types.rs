//! Core type definitions for session data and summaries

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::System => write!(f, "system"),
        }
    }
}

/// A single tool invocation attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolUse {
    pub name: String,
    /// File the tool touched, when the input names one
    pub file_path: Option<String>,
}

/// One turn in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Tool invocations in invocation order
    #[serde(default)]
    pub tool_uses: Vec<ToolUse>,
}

/// A parsed session transcript
#[derive(Debug, Clone)]
pub struct SessionData {
    pub session_id: String,
    /// Decoded from the encoded directory name containing the transcript
    pub project_path: String,
    pub git_branch: Option<String>,
    /// Chronological message sequence
    pub messages: Vec<Message>,
    /// Deduplicated file paths from tool uses, discovery order
    pub files_touched: Vec<String>,
    pub first_timestamp: DateTime<Utc>,
    pub last_timestamp: DateTime<Utc>,
    pub source_file: PathBuf,
}

impl SessionData {
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn user_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.role == Role::User).count()
    }

    /// Session length in minutes
    pub fn duration_minutes(&self) -> f64 {
        let secs = (self.last_timestamp - self.first_timestamp).num_seconds();
        secs.max(0) as f64 / 60.0
    }

    /// Distinct tool names observed across all messages
    pub fn tool_names(&self) -> BTreeSet<String> {
        self.messages
            .iter()
            .flat_map(|m| m.tool_uses.iter())
            .map(|t| t.name.clone())
            .collect()
    }
}

/// Searchable projection of a session, persisted by a storage backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub project_path: String,
    pub git_branch: Option<String>,
    pub topic: String,
    pub key_decisions: Vec<String>,
    pub files_modified: Vec<String>,
    pub technologies: Vec<String>,
    pub outcome: String,
    pub message_count: usize,
    pub duration_minutes: f64,
    /// ISO-8601 UTC; preserved by the caller across re-indexing
    pub created_at: String,
    /// ISO-8601 UTC; refreshed on every index
    pub last_updated: String,
}

/// A single search hit
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub session_id: String,
    /// Backend-relative relevance, higher = better; only the order is meaningful
    pub score: f64,
    pub summary: SessionSummary,
}

impl SearchResult {
    /// Command that resumes this session; fixed format consumed by the operator
    pub fn fork_command(&self) -> String {
        format!("claude --resume {}", self.session_id)
    }
}
