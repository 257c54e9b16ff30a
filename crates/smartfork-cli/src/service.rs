//! Session service: parser -> summarizer -> storage backend

use std::path::{Path, PathBuf};

use anyhow::Result;
use smartfork_core::{parse_session_file, Config, SearchResult, SessionSummary};
use smartfork_store::{create_backend, StorageBackend, StorageStats};
use smartfork_summarize::{create_summarizer, Summarizer};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Result of indexing one transcript file
#[derive(Debug)]
pub enum IndexOutcome {
    /// Summary written to the backend
    Indexed(SessionSummary),
    /// Missing, empty, or unparseable transcript; nothing to index
    NothingToIndex,
}

/// Result of indexing the whole sessions tree
#[derive(Debug, Default)]
pub struct IndexAllReport {
    pub files_seen: usize,
    pub sessions_indexed: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
}

/// Composition layer the CLI and hooks talk to
pub struct SessionService {
    config: Config,
    summarizer: Box<dyn Summarizer>,
    backend: Box<dyn StorageBackend>,
}

impl SessionService {
    /// Build a service from configuration; fails fast on an unknown
    /// backend or summarizer name
    pub fn new(config: Config) -> Result<Self> {
        let summarizer = create_summarizer(&config.summarizer)?;
        let backend = create_backend(&config.backend, &config)?;
        Ok(Self {
            config,
            summarizer,
            backend,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse, summarize, and upsert one transcript.
    ///
    /// Re-indexing a known session preserves its original `created_at`;
    /// `last_updated` carries the fresh stamp.
    pub fn index_file(&mut self, path: &Path) -> Result<IndexOutcome> {
        let Some(session) = parse_session_file(path) else {
            debug!(file = %path.display(), "nothing to index");
            return Ok(IndexOutcome::NothingToIndex);
        };

        let mut summary = self.summarizer.summarize(&session);
        if let Some(existing) = self.backend.get(&summary.session_id)? {
            summary.created_at = existing.created_at;
        }
        self.backend.index(&summary)?;
        Ok(IndexOutcome::Indexed(summary))
    }

    /// Index every transcript under the configured sessions root.
    /// Per-file failures are logged and skipped.
    pub fn index_all(&mut self) -> IndexAllReport {
        let mut report = IndexAllReport::default();

        for file in find_transcript_files(&self.config.sessions_path) {
            report.files_seen += 1;
            match self.index_file(&file) {
                Ok(IndexOutcome::Indexed(_)) => report.sessions_indexed += 1,
                Ok(IndexOutcome::NothingToIndex) => report.files_skipped += 1,
                Err(err) => {
                    warn!(file = %file.display(), %err, "failed to index transcript");
                    report.files_failed += 1;
                }
            }
        }

        report
    }

    /// Search the index, best match first, truncated to `limit`
    pub fn search(
        &self,
        query: &str,
        project_filter: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        let mut results = self.backend.search(query, project_filter)?;
        results.truncate(limit);
        Ok(results)
    }

    pub fn get(&self, session_id: &str) -> Result<Option<SessionSummary>> {
        Ok(self.backend.get(session_id)?)
    }

    pub fn is_indexed(&self, session_id: &str) -> Result<bool> {
        Ok(self.backend.is_indexed(session_id)?)
    }

    pub fn delete(&mut self, session_id: &str) -> Result<bool> {
        Ok(self.backend.delete(session_id)?)
    }

    pub fn stats(&self) -> Result<StorageStats> {
        Ok(self.backend.get_stats()?)
    }

    pub fn clear(&mut self) -> Result<()> {
        Ok(self.backend.clear()?)
    }
}

/// Find all transcript JSONL files under the sessions root
pub fn find_transcript_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.ends_with(".jsonl") {
                    files.push(path.to_path_buf());
                }
            }
        }
    }

    files.sort();
    files
}
