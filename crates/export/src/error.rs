//! Export error types.

use clinicdash_core::reports::{ReportError, Target};
use clinicdash_shared::AppError;
use thiserror::Error;

/// Errors that can occur while emitting an artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The table breaks the header/row contract.
    #[error("Invalid table: {0}")]
    InvalidTable(#[from] ReportError),

    /// The report was formatted for another target.
    #[error("Report formatted for {actual:?} cannot be emitted as {expected:?}")]
    TargetMismatch {
        /// Target required by the emitter.
        expected: Target,
        /// Target the report was formatted for.
        actual: Target,
    },

    /// The table exceeds the artifact's addressable size.
    #[error("Table too large: {0}")]
    TooLarge(String),

    /// xlsx writer failure.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// PDF writer failure.
    #[error("Document error: {0}")]
    Document(String),

    /// Writing the artifact failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Create a document error.
    #[must_use]
    pub fn document(msg: impl std::fmt::Display) -> Self {
        Self::Document(msg.to_string())
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::InvalidTable(_) | ExportError::TargetMismatch { .. } => {
                Self::Contract(err.to_string())
            }
            ExportError::Io(_) => Self::Io(err.to_string()),
            ExportError::TooLarge(_)
            | ExportError::Spreadsheet(_)
            | ExportError::Document(_) => Self::Export(err.to_string()),
        }
    }
}
