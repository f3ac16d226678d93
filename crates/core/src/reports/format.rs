//! Cell formatting rules.
//!
//! | Value  | Spreadsheet  | Document     |
//! |--------|--------------|--------------|
//! | Date   | `2024-01-15` | `01/15/2024` |
//! | Count  | `12500`      | `12,500`     |
//! | Money  | `$3250.00`   | `$3250.00`   |
//! | Status | `COMPLETED`  | `COMPLETED`  |

use chrono::{NaiveDate, NaiveDateTime};
use clinicdash_shared::types::{Currency, Money};
use rust_decimal::Decimal;

use super::schema::CellValue;
use super::types::{CellKind, Target};
use crate::orders::OrderStatus;

/// Date format for spreadsheet cells.
pub const SPREADSHEET_DATE_FORMAT: &str = "%Y-%m-%d";
/// Date format for document cells.
pub const DOCUMENT_DATE_FORMAT: &str = "%m/%d/%Y";
/// Format of the generation timestamp, e.g. `Jan 5, 2024, 3:04:05 PM`.
pub const TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %-I:%M:%S %p";
/// Placeholder for non-summable cells in a totals row.
pub const NOT_APPLICABLE: &str = "-";

/// Formats cell values for one target and currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFormatter {
    target: Target,
    currency: Currency,
}

impl CellFormatter {
    /// Creates a formatter.
    #[must_use]
    pub const fn new(target: Target, currency: Currency) -> Self {
        Self { target, currency }
    }

    /// Target this formatter renders for.
    #[must_use]
    pub const fn target(&self) -> Target {
        self.target
    }

    /// Formats a single cell.
    #[must_use]
    pub fn format(&self, value: &CellValue) -> String {
        match value {
            CellValue::Text(text) => text.clone(),
            CellValue::Count(count) => self.count(*count),
            CellValue::Money(amount) => self.money(*amount),
            CellValue::Date(date) => self.date(*date),
            CellValue::Status(status) => Self::status(*status),
        }
    }

    /// Formats a date for the target.
    #[must_use]
    pub fn date(&self, date: NaiveDate) -> String {
        let pattern = match self.target {
            Target::Spreadsheet => SPREADSHEET_DATE_FORMAT,
            Target::Document => DOCUMENT_DATE_FORMAT,
        };
        date.format(pattern).to_string()
    }

    /// Formats a count; grouped with commas for documents only.
    #[must_use]
    pub fn count(&self, count: u64) -> String {
        match self.target {
            Target::Spreadsheet => count.to_string(),
            Target::Document => group_thousands(count),
        }
    }

    /// Formats money with the currency symbol and two decimals.
    #[must_use]
    pub fn money(&self, amount: Decimal) -> String {
        Money::new(amount, self.currency).to_string()
    }

    /// Formats a status upper-cased.
    #[must_use]
    pub fn status(status: OrderStatus) -> String {
        status.as_str().to_uppercase()
    }

    /// Formats the totals cell for a column.
    #[must_use]
    pub fn total(&self, kind: CellKind, count: u64, amount: Decimal) -> String {
        match kind {
            CellKind::Count => self.count(count),
            CellKind::Money => self.money(amount),
            CellKind::Text | CellKind::Date | CellKind::Status => NOT_APPLICABLE.to_string(),
        }
    }
}

/// Formats a count with comma thousands separators, e.g. `1,234,567`.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a generation timestamp.
#[must_use]
pub fn timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
