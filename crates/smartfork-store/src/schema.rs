//! Schema creation for the SQLite backend

use rusqlite::Connection;

use crate::error::StoreError;

/// Current schema version
pub const DB_VERSION: i32 = 1;

/// Initialize the database schema; safe to call repeatedly
pub fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS metadata (
            key TEXT PRIMARY KEY,
            value TEXT
        )",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS sessions (
            session_id TEXT PRIMARY KEY,
            project_path TEXT NOT NULL,
            git_branch TEXT,
            topic TEXT NOT NULL,
            key_decisions TEXT NOT NULL,
            files_modified TEXT NOT NULL,
            technologies TEXT NOT NULL,
            outcome TEXT NOT NULL,
            message_count INTEGER NOT NULL,
            duration_minutes REAL NOT NULL,
            created_at TEXT NOT NULL,
            last_updated TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_sessions_project ON sessions(project_path);",
    )?;

    // Full-text index over the denormalized summary text
    conn.execute_batch(
        "CREATE VIRTUAL TABLE IF NOT EXISTS sessions_fts USING fts5(
            content
        )",
    )?;

    // Triggers keep sessions_fts in sync with sessions
    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS sessions_ai AFTER INSERT ON sessions BEGIN
            INSERT INTO sessions_fts(rowid, content)
            VALUES (new.rowid, new.topic || ' ' || new.outcome || ' ' || new.technologies || ' ' || new.key_decisions);
        END;

        CREATE TRIGGER IF NOT EXISTS sessions_ad AFTER DELETE ON sessions BEGIN
            INSERT INTO sessions_fts(sessions_fts, rowid, content)
            VALUES ('delete', old.rowid, old.topic || ' ' || old.outcome || ' ' || old.technologies || ' ' || old.key_decisions);
        END;

        CREATE TRIGGER IF NOT EXISTS sessions_au AFTER UPDATE ON sessions BEGIN
            INSERT INTO sessions_fts(sessions_fts, rowid, content)
            VALUES ('delete', old.rowid, old.topic || ' ' || old.outcome || ' ' || old.technologies || ' ' || old.key_decisions);
            INSERT INTO sessions_fts(rowid, content)
            VALUES (new.rowid, new.topic || ' ' || new.outcome || ' ' || new.technologies || ' ' || new.key_decisions);
        END;",
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('version', ?1)",
        [&DB_VERSION.to_string()],
    )?;

    Ok(())
}
