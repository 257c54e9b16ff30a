//! Keyword-based summarizer
//!
//! Derives every summary field from fixed lookup tables and simple scans,
//! so identical session data always produces the same summary (apart from
//! the two timestamps, stamped once per call).

use std::collections::BTreeSet;

use chrono::{SecondsFormat, Utc};
use smartfork_core::{Role, SessionData, SessionSummary};

use crate::Summarizer;

/// File extension -> language name
const EXTENSION_TECHNOLOGIES: &[(&str, &str)] = &[
    ("rs", "Rust"),
    ("py", "Python"),
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("js", "JavaScript"),
    ("jsx", "JavaScript"),
    ("go", "Go"),
    ("rb", "Ruby"),
    ("java", "Java"),
    ("kt", "Kotlin"),
    ("swift", "Swift"),
    ("c", "C"),
    ("h", "C"),
    ("cpp", "C++"),
    ("cs", "C#"),
    ("php", "PHP"),
    ("sh", "Shell"),
    ("sql", "SQL"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("scss", "CSS"),
    ("vue", "Vue"),
    ("tf", "Terraform"),
];

/// Lowercased keyword -> framework/tool name, matched case-insensitively
/// against message content
const CONTENT_TECHNOLOGIES: &[(&str, &str)] = &[
    ("react", "React"),
    ("next.js", "Next.js"),
    ("angular", "Angular"),
    ("svelte", "Svelte"),
    ("express", "Express"),
    ("fastapi", "FastAPI"),
    ("django", "Django"),
    ("flask", "Flask"),
    ("axum", "Axum"),
    ("tokio", "Tokio"),
    ("redis", "Redis"),
    ("postgres", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("sqlite", "SQLite"),
    ("mongodb", "MongoDB"),
    ("graphql", "GraphQL"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
    ("terraform", "Terraform"),
    ("tailwind", "Tailwind"),
    ("webpack", "Webpack"),
    ("vite", "Vite"),
    ("jwt", "JWT"),
];

const COMPLETION_KEYWORDS: &[&str] = &["complete", "completed", "done", "finished", "all tests pass"];

const FAILURE_KEYWORDS: &[&str] = &["error", "failed", "failing", "broken", "blocked"];

/// Phrases that flag a sentence as a decision worth keeping
const DECISION_MARKERS: &[&str] = &[
    "decided to",
    "i'll use",
    "we'll use",
    "let's use",
    "going with",
    "opted for",
    "chose",
    "switching to",
];

const TOPIC_MAX_CHARS: usize = 100;
const MAX_KEY_DECISIONS: usize = 5;

/// Keyword-based summarizer, the `simple` configuration choice
pub struct SimpleSummarizer;

impl Summarizer for SimpleSummarizer {
    fn name(&self) -> &str {
        "simple"
    }

    fn summarize(&self, session: &SessionData) -> SessionSummary {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        SessionSummary {
            session_id: session.session_id.clone(),
            project_path: session.project_path.clone(),
            git_branch: session.git_branch.clone(),
            topic: extract_topic(session),
            key_decisions: extract_key_decisions(session),
            files_modified: session.files_touched.clone(),
            technologies: detect_technologies(session),
            outcome: determine_outcome(session),
            message_count: session.message_count(),
            duration_minutes: session.duration_minutes(),
            created_at: now.clone(),
            last_updated: now,
        }
    }
}

/// Topic from the first non-trivial user message; never empty when the
/// session has at least one message
fn extract_topic(session: &SessionData) -> String {
    let candidate = session
        .messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| m.content.trim())
        .find(|c| c.len() >= 10)
        .or_else(|| {
            session
                .messages
                .iter()
                .map(|m| m.content.trim())
                .find(|c| !c.is_empty())
        });

    match candidate {
        Some(text) => truncate_chars(text.lines().next().unwrap_or(text), TOPIC_MAX_CHARS),
        None => "Untitled session".to_string(),
    }
}

/// Technologies from file extensions plus content keywords, merged and
/// deduplicated, in stable alphabetical order
fn detect_technologies(session: &SessionData) -> Vec<String> {
    let mut found: BTreeSet<&str> = BTreeSet::new();

    for file in &session.files_touched {
        let ext = file.rsplit('.').next().unwrap_or("");
        if ext != file.as_str() {
            if let Some((_, tech)) = EXTENSION_TECHNOLOGIES.iter().find(|(e, _)| *e == ext) {
                found.insert(tech);
            }
        }
    }

    for message in &session.messages {
        let content = message.content.to_lowercase();
        for (keyword, tech) in CONTENT_TECHNOLOGIES {
            if content.contains(keyword) {
                found.insert(tech);
            }
        }
    }

    found.into_iter().map(String::from).collect()
}

/// Outcome label from completion/failure keywords, most recent message first
fn determine_outcome(session: &SessionData) -> String {
    for message in session.messages.iter().rev() {
        let content = message.content.to_lowercase();
        if COMPLETION_KEYWORDS.iter().any(|k| content.contains(k)) {
            return "Completed successfully".to_string();
        }
        if FAILURE_KEYWORDS.iter().any(|k| content.contains(k)) {
            return "Ended with unresolved issues".to_string();
        }
    }
    "Session ended".to_string()
}

/// Best-effort decision phrases from assistant messages; may be empty
fn extract_key_decisions(session: &SessionData) -> Vec<String> {
    let mut decisions = Vec::new();

    for message in session.messages.iter().filter(|m| m.role == Role::Assistant) {
        for line in message.content.lines() {
            let lowered = line.to_lowercase();
            if DECISION_MARKERS.iter().any(|m| lowered.contains(m)) {
                let phrase = truncate_chars(line.trim(), 150);
                if !phrase.is_empty() && !decisions.contains(&phrase) {
                    decisions.push(phrase);
                }
            }
            if decisions.len() >= MAX_KEY_DECISIONS {
                return decisions;
            }
        }
    }

    decisions
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max_chars {
        let truncated: String = chars[..max_chars.saturating_sub(3)].iter().collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}
