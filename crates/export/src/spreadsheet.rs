//! xlsx emission.
//!
//! One worksheet named after the report, a bold header row, then the table
//! rows in order. Count cells are written as numbers so the sheet stays
//! sortable; everything else is written verbatim.

use clinicdash_core::reports::{CellKind, Report, Target};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};
use tracing::{info, warn};

use crate::error::ExportError;

/// Writes reports as single-sheet xlsx workbooks.
pub struct SpreadsheetEmitter;

impl SpreadsheetEmitter {
    /// Emits the report as xlsx bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the report was not formatted for spreadsheets, the
    /// table is ragged, or the workbook cannot be written.
    pub fn emit(report: &Report) -> Result<Vec<u8>, ExportError> {
        if report.target != Target::Spreadsheet {
            warn!(
                report = %report.kind,
                target = ?report.target,
                "Rejected report for spreadsheet"
            );
            return Err(ExportError::TargetMismatch {
                expected: Target::Spreadsheet,
                actual: report.target,
            });
        }
        if let Err(err) = report.table.validate() {
            warn!(report = %report.kind, error = %err, "Rejected malformed table");
            return Err(err.into());
        }

        let table = &report.table;
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let sheet = workbook.add_worksheet();
        sheet.set_name(report.sheet_name.as_str())?;

        for (col, column) in table.columns.iter().enumerate() {
            sheet.write_string_with_format(
                0,
                col_num(col)?,
                column.header.as_str(),
                &header_format,
            )?;
        }

        for (index, row) in table.rows.iter().enumerate() {
            let row_num = row_num(index + 1)?;
            for (col, (cell, column)) in row.iter().zip(&table.columns).enumerate() {
                let col_num = col_num(col)?;
                match (column.kind, cell.parse::<u64>()) {
                    (CellKind::Count, Ok(count)) => {
                        sheet.write_number(row_num, col_num, count_cell(count))?;
                    }
                    _ => {
                        sheet.write_string(row_num, col_num, cell.as_str())?;
                    }
                }
            }
        }
        sheet.autofit();

        let bytes = workbook.save_to_buffer()?;
        info!(
            report = %report.kind,
            rows = table.rows.len(),
            bytes = bytes.len(),
            "Emitted spreadsheet"
        );
        Ok(bytes)
    }
}

/// xlsx stores every number as a double; counts past 2^53 lose precision.
#[allow(clippy::cast_precision_loss)]
fn count_cell(count: u64) -> f64 {
    count as f64
}

fn row_num(index: usize) -> Result<RowNum, ExportError> {
    RowNum::try_from(index).map_err(|_| ExportError::TooLarge(format!("row {index}")))
}

fn col_num(index: usize) -> Result<ColNum, ExportError> {
    ColNum::try_from(index).map_err(|_| ExportError::TooLarge(format!("column {index}")))
}
