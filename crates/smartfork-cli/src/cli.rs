//! CLI argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use smartfork_core::Config;
use std::path::PathBuf;

/// Search and resume past Claude Code sessions
#[derive(Parser, Debug)]
#[command(name = "smart-fork")]
#[command(version)]
#[command(about = "Index and search past Claude Code sessions")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Custom data directory for the index database
    #[arg(long, global = true, env = "SMART_FORK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Root directory of the on-disk transcripts
    #[arg(long, global = true, env = "SMART_FORK_SESSIONS_PATH")]
    pub sessions_path: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Resolve the effective configuration for this invocation
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(sessions_path) = &self.sessions_path {
            config.sessions_path = sessions_path.clone();
        }
        config
    }
}

/// Output format for commands
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output (one object per line for lists)
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search indexed sessions by topic, technology, or decision
    Search {
        /// Search query
        query: String,

        /// Only sessions whose project path contains this string
        #[arg(short, long)]
        project: Option<String>,

        /// Limit results
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Index a transcript file, or every transcript under the sessions root
    Index {
        /// Transcript file to index
        path: Option<PathBuf>,

        /// Index all transcripts under the sessions root
        #[arg(long)]
        all: bool,
    },

    /// Show the indexed summary for one session
    Show {
        /// Session ID
        session_id: String,
    },

    /// Show index statistics
    Stats,

    /// Remove one session from the index
    Delete {
        /// Session ID
        session_id: String,
    },

    /// Remove every session from the index
    Clear {
        /// Skip the confirmation guard
        #[arg(long)]
        force: bool,
    },

    /// Hook entry points invoked by the surrounding tool
    #[command(subcommand)]
    Hook(HookCommand),
}

#[derive(Subcommand, Debug)]
pub enum HookCommand {
    /// Index the finished session (payload on stdin)
    SessionEnd,

    /// Backfill an unindexed session mid-conversation (payload on stdin)
    PromptSubmit,
}
