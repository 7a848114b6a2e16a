//! Error types shared by the collection, grouping and rendering stages.

use std::path::PathBuf;

/// Errors that abort a release-notes run.
///
/// There is no recoverable subset: every variant is surfaced to the caller
/// immediately and no partial output is kept.
#[derive(Debug, thiserror::Error)]
pub enum ReleaseNotesError {
    /// A local input file is missing or unreadable.
    #[error("failed to read '{}': {source}", path.display())]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A local input is present but malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The remote tracker could not be reached or returned garbage.
    #[error("network error: {0}")]
    Network(String),
    /// The remote tracker reported that the requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// A Markdown template referenced a field that has no value.
    #[error("format error: {0}")]
    Format(String),
    /// Writing an output artifact failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
    /// Walking the git history failed.
    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

impl From<reqwest::Error> for ReleaseNotesError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<std::fmt::Error> for ReleaseNotesError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Format(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReleaseNotesError>;
