//! Report error types.

use clinicdash_shared::AppError;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A row does not have one cell per column.
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RowWidthMismatch {
        /// Zero-based row index.
        row: usize,
        /// Number of columns.
        expected: usize,
        /// Number of cells in the row.
        actual: usize,
    },

    /// Table has no columns.
    #[error("Table has no columns")]
    NoColumns,
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self::Contract(err.to_string())
    }
}
