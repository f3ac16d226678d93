//! Fixture loading errors.

use std::path::PathBuf;

use clinicdash_shared::AppError;
use thiserror::Error;

/// Errors that can occur while loading fixture data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Fixture file could not be read.
    #[error("Failed to read fixture {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Fixture JSON is malformed or has the wrong shape.
    #[error("Malformed fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Io { .. } => Self::Io(err.to_string()),
            SourceError::Parse(_) => Self::Validation(err.to_string()),
        }
    }
}
