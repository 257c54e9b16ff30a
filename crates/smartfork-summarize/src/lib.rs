//! smartfork-summarize - Session summarization capability
//!
//! A [`Summarizer`] reduces parsed session data to the compact, searchable
//! [`SessionSummary`] the storage layer indexes. Implementations are
//! interchangeable and selected by name through [`create_summarizer`].

pub mod simple;

use smartfork_core::{SessionData, SessionSummary};
use thiserror::Error;

pub use simple::SimpleSummarizer;

/// Summarizer construction errors
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("unknown summarizer: {0}")]
    UnknownSummarizer(String),
}

/// Reduces session data to a searchable summary
pub trait Summarizer {
    /// Configuration name this implementation answers to
    fn name(&self) -> &str;

    fn summarize(&self, session: &SessionData) -> SessionSummary;
}

/// Resolve a summarizer by its configured name.
///
/// Fails fast on an unrecognized name; there is no silent default.
pub fn create_summarizer(name: &str) -> Result<Box<dyn Summarizer>, SummarizeError> {
    match name {
        "simple" => Ok(Box::new(SimpleSummarizer)),
        other => Err(SummarizeError::UnknownSummarizer(other.to_string())),
    }
}
