//! smartfork-store - Durable storage for session summaries
//!
//! A [`StorageBackend`] owns the durable copy of indexed summaries and
//! answers lexical search queries over them. Implementations are
//! interchangeable and selected by name through [`create_backend`].

pub mod error;
pub mod schema;
pub mod sqlite;

use std::collections::BTreeMap;

use serde::Serialize;
use smartfork_core::{Config, SearchResult, SessionSummary};

pub use error::StoreError;
pub use sqlite::SqliteBackend;

/// Aggregate statistics over the indexed sessions
#[derive(Debug, Clone, Serialize)]
pub struct StorageStats {
    pub total_sessions: i64,
    pub backend: String,
    pub by_project: BTreeMap<String, i64>,
}

/// Persists session summaries and answers search queries.
///
/// All operations are synchronous and safe to call repeatedly; missing
/// records surface as `None`/`false`, never as errors.
pub trait StorageBackend {
    /// Configuration name this implementation answers to
    fn name(&self) -> &str;

    /// Upsert keyed on `session_id`; an existing record is fully replaced
    fn index(&mut self, summary: &SessionSummary) -> Result<(), StoreError>;

    fn is_indexed(&self, session_id: &str) -> Result<bool, StoreError>;

    fn get(&self, session_id: &str) -> Result<Option<SessionSummary>, StoreError>;

    /// Lexical search over the denormalized summary text, best match first.
    /// `project_filter` restricts results to project paths containing it.
    fn search(
        &self,
        query: &str,
        project_filter: Option<&str>,
    ) -> Result<Vec<SearchResult>, StoreError>;

    /// True iff a record existed and was removed
    fn delete(&mut self, session_id: &str) -> Result<bool, StoreError>;

    fn get_stats(&self) -> Result<StorageStats, StoreError>;

    /// Remove every record, leaving the store freshly initialized
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Resolve a storage backend by its configured name.
///
/// Fails fast on an unrecognized name; there is no silent default.
pub fn create_backend(name: &str, config: &Config) -> Result<Box<dyn StorageBackend>, StoreError> {
    match name {
        "sqlite" => Ok(Box::new(SqliteBackend::open(config)?)),
        other => Err(StoreError::UnknownBackend(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_resolves_sqlite() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::default().with_data_dir(tmp.path());
        let backend = create_backend("sqlite", &config).unwrap();
        assert_eq!(backend.name(), "sqlite");
    }

    #[test]
    fn test_factory_rejects_unknown_name() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::default().with_data_dir(tmp.path());
        let err = create_backend("postgres", &config).err().unwrap();
        assert!(matches!(err, StoreError::UnknownBackend(ref name) if name == "postgres"));
        assert!(!err.is_retryable());
    }
}
