//! SQLite storage backend with an FTS5 search index

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use smartfork_core::{Config, SearchResult, SessionSummary};

use crate::error::StoreError;
use crate::schema;
use crate::{StorageBackend, StorageStats};

/// Embedded relational backend, the `sqlite` configuration choice
pub struct SqliteBackend {
    conn: Connection,
    path: PathBuf,
}

impl SqliteBackend {
    /// Open or create the store under the configured data directory
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        config.ensure_directories()?;
        Self::open_at(&config.db_path())
    }

    /// Open or create the store at a specific path
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // WAL keeps concurrent hook/CLI invocations from tripping over each
        // other; busy_timeout makes a held write lock block briefly instead
        // of failing immediately
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 1000;",
        )?;

        schema::init_schema(&conn)?;

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Quote query terms and join with OR so punctuation cannot break FTS syntax
fn build_fts_query(query: &str) -> String {
    query
        .split_whitespace()
        .filter(|w| !w.is_empty())
        .map(|w| format!("\"{}\"", w.replace('"', "")))
        .collect::<Vec<_>>()
        .join(" OR ")
}

fn row_to_summary(row: &rusqlite::Row) -> rusqlite::Result<SessionSummary> {
    let key_decisions: String = row.get(4)?;
    let files_modified: String = row.get(5)?;
    let technologies: String = row.get(6)?;

    Ok(SessionSummary {
        session_id: row.get(0)?,
        project_path: row.get(1)?,
        git_branch: row.get(2)?,
        topic: row.get(3)?,
        key_decisions: serde_json::from_str(&key_decisions).unwrap_or_default(),
        files_modified: serde_json::from_str(&files_modified).unwrap_or_default(),
        technologies: serde_json::from_str(&technologies).unwrap_or_default(),
        outcome: row.get(7)?,
        message_count: row.get::<_, i64>(8)? as usize,
        duration_minutes: row.get(9)?,
        created_at: row.get(10)?,
        last_updated: row.get(11)?,
    })
}

impl StorageBackend for SqliteBackend {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn index(&mut self, summary: &SessionSummary) -> Result<(), StoreError> {
        let key_decisions = serde_json::to_string(&summary.key_decisions)?;
        let files_modified = serde_json::to_string(&summary.files_modified)?;
        let technologies = serde_json::to_string(&summary.technologies)?;

        let tx = self.conn.transaction()?;
        // ON CONFLICT upsert rather than INSERT OR REPLACE: the update path
        // must fire the FTS update trigger, and REPLACE's internal delete
        // does not fire delete triggers unless recursive_triggers is on
        tx.execute(
            "INSERT INTO sessions (session_id, project_path, git_branch, topic, key_decisions,
                files_modified, technologies, outcome, message_count, duration_minutes,
                created_at, last_updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             ON CONFLICT(session_id) DO UPDATE SET
                project_path = excluded.project_path,
                git_branch = excluded.git_branch,
                topic = excluded.topic,
                key_decisions = excluded.key_decisions,
                files_modified = excluded.files_modified,
                technologies = excluded.technologies,
                outcome = excluded.outcome,
                message_count = excluded.message_count,
                duration_minutes = excluded.duration_minutes,
                created_at = excluded.created_at,
                last_updated = excluded.last_updated",
            rusqlite::params![
                summary.session_id,
                summary.project_path,
                summary.git_branch,
                summary.topic,
                key_decisions,
                files_modified,
                technologies,
                summary.outcome,
                summary.message_count as i64,
                summary.duration_minutes,
                summary.created_at,
                summary.last_updated,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn is_indexed(&self, session_id: &str) -> Result<bool, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sessions WHERE session_id = ?1",
            [session_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn get(&self, session_id: &str) -> Result<Option<SessionSummary>, StoreError> {
        let sql = "
            SELECT session_id, project_path, git_branch, topic, key_decisions,
                   files_modified, technologies, outcome, message_count,
                   duration_minutes, created_at, last_updated
            FROM sessions
            WHERE session_id = ?1
        ";
        match self.conn.query_row(sql, [session_id], row_to_summary) {
            Ok(summary) => Ok(Some(summary)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn search(
        &self,
        query: &str,
        project_filter: Option<&str>,
    ) -> Result<Vec<SearchResult>, StoreError> {
        let fts_query = build_fts_query(query);
        if fts_query.is_empty() {
            return Ok(Vec::new());
        }

        let mut results = Vec::new();

        if let Some(project) = project_filter {
            let sql = "
                SELECT s.session_id, s.project_path, s.git_branch, s.topic, s.key_decisions,
                       s.files_modified, s.technologies, s.outcome, s.message_count,
                       s.duration_minutes, s.created_at, s.last_updated,
                       bm25(sessions_fts) AS rank
                FROM sessions_fts
                JOIN sessions s ON sessions_fts.rowid = s.rowid
                WHERE sessions_fts MATCH ?1
                  AND s.project_path LIKE '%' || ?2 || '%'
                ORDER BY bm25(sessions_fts)
            ";
            let mut stmt = self.conn.prepare(sql)?;
            let rows = stmt.query_map(rusqlite::params![fts_query, project], |row| {
                let summary = row_to_summary(row)?;
                let rank: f64 = row.get(12)?;
                Ok((summary, rank))
            })?;
            for row in rows {
                let (summary, rank) = row?;
                results.push(SearchResult {
                    session_id: summary.session_id.clone(),
                    score: -rank,
                    summary,
                });
            }
        } else {
            let sql = "
                SELECT s.session_id, s.project_path, s.git_branch, s.topic, s.key_decisions,
                       s.files_modified, s.technologies, s.outcome, s.message_count,
                       s.duration_minutes, s.created_at, s.last_updated,
                       bm25(sessions_fts) AS rank
                FROM sessions_fts
                JOIN sessions s ON sessions_fts.rowid = s.rowid
                WHERE sessions_fts MATCH ?1
                ORDER BY bm25(sessions_fts)
            ";
            let mut stmt = self.conn.prepare(sql)?;
            let rows = stmt.query_map([&fts_query], |row| {
                let summary = row_to_summary(row)?;
                let rank: f64 = row.get(12)?;
                Ok((summary, rank))
            })?;
            for row in rows {
                let (summary, rank) = row?;
                results.push(SearchResult {
                    session_id: summary.session_id.clone(),
                    score: -rank,
                    summary,
                });
            }
        }

        Ok(results)
    }

    fn delete(&mut self, session_id: &str) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute("DELETE FROM sessions WHERE session_id = ?1", [session_id])?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    fn get_stats(&self) -> Result<StorageStats, StoreError> {
        let total_sessions: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;

        let mut by_project = BTreeMap::new();
        let mut stmt = self
            .conn
            .prepare("SELECT project_path, COUNT(*) FROM sessions GROUP BY project_path")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        for row in rows {
            let (project, count) = row?;
            by_project.insert(project, count);
        }

        Ok(StorageStats {
            total_sessions,
            backend: self.name().to_string(),
            by_project,
        })
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM sessions", [])?;
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_backend(tmp: &TempDir) -> SqliteBackend {
        SqliteBackend::open_at(&tmp.path().join("sessions.db")).unwrap()
    }

    fn sample_summary() -> SessionSummary {
        SessionSummary {
            session_id: "test-session-123".to_string(),
            project_path: "/home/user/projects/my-api".to_string(),
            git_branch: Some("feature/auth".to_string()),
            topic: "Implementing JWT authentication for Express API".to_string(),
            key_decisions: vec![
                "Using RS256 for signing".to_string(),
                "Redis for refresh tokens".to_string(),
            ],
            files_modified: vec![
                "src/middleware/auth.ts".to_string(),
                "src/config/auth.ts".to_string(),
            ],
            technologies: vec![
                "TypeScript".to_string(),
                "Express".to_string(),
                "Redis".to_string(),
                "JWT".to_string(),
            ],
            outcome: "Completed successfully".to_string(),
            message_count: 6,
            duration_minutes: 12.0,
            created_at: "2026-01-19T10:00:00Z".to_string(),
            last_updated: "2026-01-19T10:12:00Z".to_string(),
        }
    }

    #[test]
    fn test_index_then_is_indexed() {
        let tmp = tempfile::tempdir().unwrap();
        let mut backend = open_backend(&tmp);
        backend.index(&sample_summary()).unwrap();
        assert!(backend.is_indexed("test-session-123").unwrap());
        assert!(!backend.is_indexed("never-seen").unwrap());
    }

    #[test]
    fn test_index_then_get_round_trips_all_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let mut backend = open_backend(&tmp);
        let summary = sample_summary();
        backend.index(&summary).unwrap();

        let stored = backend.get(&summary.session_id).unwrap().unwrap();
        assert_eq!(stored, summary);
    }

    #[test]
    fn test_get_unknown_id_is_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let backend = open_backend(&tmp);
        assert!(backend.get("nope").unwrap().is_none());
    }

    #[test]
    fn test_search_finds_matching_session() {
        let tmp = tempfile::tempdir().unwrap();
        let mut backend = open_backend(&tmp);
        backend.index(&sample_summary()).unwrap();

        let results = backend.search("JWT authentication", None).unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].session_id, "test-session-123");
    }

    #[test]
    fn test_search_matches_technologies_and_decisions() {
        let tmp = tempfile::tempdir().unwrap();
        let mut backend = open_backend(&tmp);
        backend.index(&sample_summary()).unwrap();

        // Term only present in the technologies list
        assert!(!backend.search("Redis", None).unwrap().is_empty());
        // Term only present in key_decisions
        assert!(!backend.search("RS256", None).unwrap().is_empty());
    }

    #[test]
    fn test_search_with_project_filter() {
        let tmp = tempfile::tempdir().unwrap();
        let mut backend = open_backend(&tmp);
        backend.index(&sample_summary()).unwrap();

        let results = backend.search("authentication", Some("my-api")).unwrap();
        assert_eq!(results.len(), 1);

        let results = backend
            .search("authentication", Some("other-project"))
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_orders_by_relevance() {
        let tmp = tempfile::tempdir().unwrap();
        let mut backend = open_backend(&tmp);

        let mut strong = sample_summary();
        strong.session_id = "strong".to_string();
        strong.topic = "Redis caching layer for the Redis cluster".to_string();
        strong.key_decisions = vec!["Redis everywhere".to_string()];
        strong.technologies = vec!["Redis".to_string()];

        let mut weak = sample_summary();
        weak.session_id = "weak".to_string();
        weak.topic = "General cleanup".to_string();
        weak.key_decisions = vec!["Mentioned redis once".to_string()];
        weak.technologies = vec![];

        backend.index(&strong).unwrap();
        backend.index(&weak).unwrap();

        let results = backend.search("redis", None).unwrap();
        assert_eq!(results.len(), 2);
        // Relative order only; absolute scores are backend-internal
        assert_eq!(results[0].session_id, "strong");
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn test_search_empty_query_returns_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let mut backend = open_backend(&tmp);
        backend.index(&sample_summary()).unwrap();
        assert!(backend.search("", None).unwrap().is_empty());
        assert!(backend.search("   ", None).unwrap().is_empty());
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut backend = open_backend(&tmp);
        backend.index(&sample_summary()).unwrap();

        let mut updated = sample_summary();
        updated.topic = "Updated topic".to_string();
        updated.key_decisions = vec!["New decision".to_string()];
        updated.message_count = 10;
        backend.index(&updated).unwrap();

        let stored = backend.get("test-session-123").unwrap().unwrap();
        assert_eq!(stored.topic, "Updated topic");
        assert_eq!(stored.message_count, 10);
        assert_eq!(backend.get_stats().unwrap().total_sessions, 1);

        // The FTS index must reflect the latest content only
        assert_eq!(backend.search("Updated topic", None).unwrap().len(), 1);
        assert!(backend.search("Implementing", None).unwrap().is_empty());
    }

    #[test]
    fn test_delete_session() {
        let tmp = tempfile::tempdir().unwrap();
        let mut backend = open_backend(&tmp);
        backend.index(&sample_summary()).unwrap();

        assert!(backend.delete("test-session-123").unwrap());
        assert!(!backend.is_indexed("test-session-123").unwrap());
        assert!(backend.search("JWT", None).unwrap().is_empty());
    }

    #[test]
    fn test_delete_unknown_id_returns_false() {
        let tmp = tempfile::tempdir().unwrap();
        let mut backend = open_backend(&tmp);
        assert!(!backend.delete("never-indexed").unwrap());
    }

    #[test]
    fn test_get_stats() {
        let tmp = tempfile::tempdir().unwrap();
        let mut backend = open_backend(&tmp);
        backend.index(&sample_summary()).unwrap();

        let stats = backend.get_stats().unwrap();
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.backend, "sqlite");
        assert_eq!(stats.by_project.get("/home/user/projects/my-api"), Some(&1));
    }

    #[test]
    fn test_clear_resets_store() {
        let tmp = tempfile::tempdir().unwrap();
        let mut backend = open_backend(&tmp);
        backend.index(&sample_summary()).unwrap();

        backend.clear().unwrap();
        assert!(!backend.is_indexed("test-session-123").unwrap());
        assert_eq!(backend.get_stats().unwrap().total_sessions, 0);
        assert!(backend.search("JWT", None).unwrap().is_empty());
    }

    #[test]
    fn test_operations_survive_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sessions.db");

        {
            let mut backend = SqliteBackend::open_at(&path).unwrap();
            backend.index(&sample_summary()).unwrap();
        }

        let backend = SqliteBackend::open_at(&path).unwrap();
        assert!(backend.is_indexed("test-session-123").unwrap());
        assert_eq!(
            backend.search("JWT", None).unwrap()[0].session_id,
            "test-session-123"
        );
    }
}
