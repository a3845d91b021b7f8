//! Error types for the session crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in session persistence.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Could not create a directory.
    #[error("failed to create directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not read the session file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not write the session file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Session file contents were not valid JSON.
    #[error("invalid session file: {0}")]
    Parse(#[from] serde_json::Error),

    /// No user data directory could be determined.
    #[error("no user data directory available")]
    NoDataDir,
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
