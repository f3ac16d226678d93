//! Report data types.

use chrono::NaiveDateTime;
use clinicdash_shared::config::ExportFormat;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use super::format;
use super::kinds::ReportKind;

/// Presentation a table is formatted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Spreadsheet sheet: ISO dates, plain numeric counts.
    Spreadsheet,
    /// Paginated document: short dates, grouped counts.
    Document,
}

impl From<ExportFormat> for Target {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Xlsx => Self::Spreadsheet,
            ExportFormat::Pdf => Self::Document,
        }
    }
}

/// Kind of value held by a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Free text.
    Text,
    /// Non-negative integer count.
    Count,
    /// Monetary amount.
    Money,
    /// Calendar date.
    Date,
    /// Order status.
    Status,
}

impl CellKind {
    /// Returns true if a totals row sums this column.
    #[must_use]
    pub const fn is_summable(self) -> bool {
        matches!(self, Self::Count | Self::Money)
    }
}

/// Table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Header text.
    pub header: String,
    /// Kind of value in the column.
    pub kind: CellKind,
}

/// Formatted table: headers plus rows of cell strings aligned to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Columns in display order.
    pub columns: Vec<Column>,
    /// Rows of formatted cells, including the totals row when present.
    pub rows: Vec<Vec<String>>,
    /// Whether the last row is a synthetic totals row.
    pub has_totals: bool,
}

impl Table {
    /// Returns the header strings.
    #[must_use]
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Rows excluding the totals row.
    #[must_use]
    pub fn data_rows(&self) -> &[Vec<String>] {
        if self.has_totals && !self.rows.is_empty() {
            &self.rows[..self.rows.len() - 1]
        } else {
            &self.rows
        }
    }

    /// The totals row, if any.
    #[must_use]
    pub fn totals_row(&self) -> Option<&[String]> {
        if self.has_totals {
            self.rows.last().map(Vec::as_slice)
        } else {
            None
        }
    }

    /// Checks that the table has columns and every row has one cell per column.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NoColumns` or `ReportError::RowWidthMismatch`.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.columns.is_empty() {
            return Err(ReportError::NoColumns);
        }

        let expected = self.width();
        match self
            .rows
            .iter()
            .position(|row| row.len() != expected)
        {
            Some(row) => Err(ReportError::RowWidthMismatch {
                row,
                expected,
                actual: self.rows[row].len(),
            }),
            None => Ok(()),
        }
    }
}

/// Labelled figure printed above a document table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    /// Label, e.g. `Total Credits Consumed`.
    pub label: String,
    /// Formatted value.
    pub value: String,
}

impl SummaryLine {
    /// Creates a summary line.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// A formatted report ready for emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Report kind.
    pub kind: ReportKind,
    /// Presentation the cells were formatted for.
    pub target: Target,
    /// Document title.
    pub title: String,
    /// Worksheet name.
    pub sheet_name: String,
    /// Default file name without extension.
    pub file_stem: String,
    /// Generation timestamp.
    pub generated_at: NaiveDateTime,
    /// Summary lines printed above the document table.
    pub summary: Vec<SummaryLine>,
    /// Table content.
    pub table: Table,
}

impl Report {
    /// Returns the `Generated: ...` line printed under the title.
    #[must_use]
    pub fn generated_line(&self) -> String {
        format!("Generated: {}", format::timestamp(self.generated_at))
    }

    /// Returns the default file name for the given format.
    #[must_use]
    pub fn default_filename(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.file_stem, format.extension())
    }
}
