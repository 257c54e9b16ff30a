//! Render a session into a single text blob for a summarizer

use crate::types::{Role, SessionData};

/// Marker appended when the rendering is cut short
const TRUNCATION_MARKER: &str = "\n[conversation truncated]";

/// Default character limit for summarizer input
pub const DEFAULT_MAX_CHARS: usize = 8_000;

/// Build the summarizer input: a metadata header followed by the
/// chronological transcript with role markers. The result never exceeds
/// `max_chars` plus the fixed truncation-marker overhead. Pure function,
/// deterministic for identical input.
pub fn prepare_for_summarization(session: &SessionData, max_chars: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!("Project: {}\n", session.project_path));
    if let Some(branch) = &session.git_branch {
        out.push_str(&format!("Branch: {}\n", branch));
    }
    out.push_str(&format!(
        "Messages: {} total, {} from user\n",
        session.message_count(),
        session.user_message_count()
    ));
    out.push_str("\nConversation:\n");

    for message in &session.messages {
        let marker = match message.role {
            Role::User => "USER",
            Role::Assistant => "CLAUDE",
            Role::System => "SYSTEM",
        };
        out.push_str(marker);
        out.push_str(": ");
        out.push_str(&message.content);
        out.push('\n');

        if out.len() > max_chars {
            break;
        }
    }

    if out.len() > max_chars {
        out.truncate(floor_char_boundary(&out, max_chars));
        out.push_str(TRUNCATION_MARKER);
    }

    out
}

/// Nearest char boundary at or below `max_bytes`
fn floor_char_boundary(s: &str, max_bytes: usize) -> usize {
    let mut end = max_bytes.min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Message, SessionData};
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn sample_session() -> SessionData {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 19, 10, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2026, 1, 19, 10, 12, 0).unwrap();
        SessionData {
            session_id: "test-session-123".to_string(),
            project_path: "/home/user/projects/api".to_string(),
            git_branch: Some("feature/auth".to_string()),
            messages: vec![
                Message {
                    role: Role::User,
                    content: "Help me add JWT authentication".to_string(),
                    timestamp: t0,
                    tool_uses: vec![],
                },
                Message {
                    role: Role::Assistant,
                    content: "Done, the middleware now verifies tokens.".to_string(),
                    timestamp: t1,
                    tool_uses: vec![],
                },
            ],
            files_touched: vec![],
            first_timestamp: t0,
            last_timestamp: t1,
            source_file: PathBuf::from("/t.jsonl"),
        }
    }

    #[test]
    fn test_includes_metadata() {
        let text = prepare_for_summarization(&sample_session(), DEFAULT_MAX_CHARS);
        assert!(text.contains("feature/auth"));
        assert!(text.contains("/home/user/projects/api"));
        assert!(text.contains("Conversation"));
        assert!(text.contains("2 total, 1 from user"));
    }

    #[test]
    fn test_includes_role_markers() {
        let text = prepare_for_summarization(&sample_session(), DEFAULT_MAX_CHARS);
        assert!(text.contains("USER: Help me add JWT authentication"));
        assert!(text.contains("CLAUDE: Done"));
    }

    #[test]
    fn test_truncates_long_content() {
        let mut session = sample_session();
        session.messages[1].content = "x".repeat(5_000);

        let text = prepare_for_summarization(&session, 500);
        assert!(text.len() <= 500 + TRUNCATION_MARKER.len());
        assert!(text.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let mut session = sample_session();
        session.messages[1].content = "é".repeat(2_000);

        // Must not panic on a multi-byte boundary
        let text = prepare_for_summarization(&session, 101);
        assert!(text.len() <= 101 + TRUNCATION_MARKER.len());
    }

    #[test]
    fn test_deterministic() {
        let session = sample_session();
        let a = prepare_for_summarization(&session, 500);
        let b = prepare_for_summarization(&session, 500);
        assert_eq!(a, b);
    }
}
