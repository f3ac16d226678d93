//! Tabular report generation.
//!
//! This module turns domain records into report tables:
//! - Orders
//! - Credit Billing
//! - Communications
//! - Clinic Summaries
//! - Clinic Order Details
//!
//! Every report kind is described by a [`ReportSchema`] of typed columns; one
//! generic renderer formats cells for either a spreadsheet or a document.

pub mod error;
pub mod format;
pub mod kinds;
pub mod schema;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use format::CellFormatter;
pub use kinds::ReportKind;
pub use schema::{CellValue, ColumnSpec, ReportSchema};
pub use service::{ReportContext, ReportService};
pub use types::*;
