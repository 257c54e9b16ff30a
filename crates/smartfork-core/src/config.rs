//! Configuration surface consumed by the core components
//!
//! Loading (flags, environment) happens in the CLI; the core only ever sees
//! a fully-formed `Config` value passed in explicitly.

use std::io;
use std::path::{Path, PathBuf};

/// Default data directory (~/.smart-fork)
pub fn default_data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
    PathBuf::from(home).join(".smart-fork")
}

/// Default sessions directory (~/.claude/projects)
pub fn default_sessions_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
    PathBuf::from(home).join(".claude").join("projects")
}

/// Resolved configuration for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the index database lives
    pub data_dir: PathBuf,
    /// Root of the on-disk transcript tree
    pub sessions_path: PathBuf,
    /// Storage backend name, resolved by the backend factory
    pub backend: String,
    /// Summarizer name, resolved by the summarizer factory
    pub summarizer: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            sessions_path: default_sessions_path(),
            backend: "sqlite".to_string(),
            summarizer: "simple".to_string(),
        }
    }
}

impl Config {
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_sessions_path(mut self, sessions_path: impl Into<PathBuf>) -> Self {
        self.sessions_path = sessions_path.into();
        self
    }

    /// Path of the index database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("sessions.db")
    }

    /// Create the data directory if it does not exist yet
    pub fn ensure_directories(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
