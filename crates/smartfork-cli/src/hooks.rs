//! Hook entry points
//!
//! The surrounding tool invokes these at fixed lifecycle moments with a
//! JSON payload on stdin. A hook must never break the tool that called it:
//! failures are logged and swallowed, and the process exits cleanly.

use std::io::Read;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::service::{IndexOutcome, SessionService};

/// Payload delivered on stdin by the hook runner
#[derive(Debug, Deserialize)]
pub struct HookPayload {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub transcript_path: Option<PathBuf>,
}

/// Decode the hook payload; a malformed payload is treated as absent
pub fn read_payload(mut reader: impl Read) -> Option<HookPayload> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw).ok()?;
    match serde_json::from_str(&raw) {
        Ok(payload) => Some(payload),
        Err(err) => {
            warn!(%err, "undecodable hook payload");
            None
        }
    }
}

/// Session finished: index its transcript
pub fn on_session_end(service: &mut SessionService, payload: &HookPayload) {
    let Some(path) = &payload.transcript_path else {
        debug!("session-end payload carries no transcript path");
        return;
    };

    match service.index_file(path) {
        Ok(IndexOutcome::Indexed(summary)) => {
            debug!(session_id = %summary.session_id, "session indexed");
        }
        Ok(IndexOutcome::NothingToIndex) => {
            debug!(file = %path.display(), "nothing to index");
        }
        Err(err) => {
            warn!(file = %path.display(), %err, "session-end indexing failed");
        }
    }
}

/// Prompt submitted mid-session: backfill the index if this session is
/// not in it yet (session-end owns the authoritative refresh)
pub fn on_prompt_submit(service: &mut SessionService, payload: &HookPayload) {
    let (Some(session_id), Some(path)) = (&payload.session_id, &payload.transcript_path) else {
        return;
    };

    match service.is_indexed(session_id) {
        Ok(true) => return,
        Ok(false) => {}
        Err(err) => {
            warn!(%err, "index lookup failed");
            return;
        }
    }

    if let Err(err) = service.index_file(path) {
        warn!(file = %path.display(), %err, "prompt-submit backfill failed");
    }
}
