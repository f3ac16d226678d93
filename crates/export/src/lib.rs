//! Artifact emitters for Clinicdash reports.
//!
//! Turns a formatted [`Report`](clinicdash_core::reports::Report) into bytes:
//! - `spreadsheet` - xlsx workbook with one named sheet
//! - `document` - paginated PDF with title, timestamp, summary and table
//! - `exporter` - format dispatch and writing artifacts to disk

pub mod document;
pub mod error;
pub mod exporter;
pub mod spreadsheet;

pub use document::{DocumentEmitter, DocumentLayout};
pub use error::ExportError;
pub use exporter::Exporter;
pub use spreadsheet::SpreadsheetEmitter;
