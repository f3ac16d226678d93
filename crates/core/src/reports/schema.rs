//! Declarative column schemas.
//!
//! A [`ReportSchema`] lists typed columns for one record type. Rendering a
//! schema over records produces a [`Table`] for a given target.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::format::CellFormatter;
use super::types::{CellKind, Column, Table, Target};
use crate::orders::OrderStatus;

/// Label placed in the first cell of a totals row.
pub const TOTALS_LABEL: &str = "Total";

/// Raw value extracted from a record before formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Free text.
    Text(String),
    /// Count.
    Count(u64),
    /// Monetary amount.
    Money(Decimal),
    /// Calendar date.
    Date(NaiveDate),
    /// Order status.
    Status(OrderStatus),
}

enum Extractor<T> {
    Text(fn(&T) -> String),
    Count(fn(&T) -> u64),
    Money(fn(&T) -> Decimal),
    Date(fn(&T) -> NaiveDate),
    Status(fn(&T) -> OrderStatus),
}

/// One column of a report schema.
pub struct ColumnSpec<T> {
    header: &'static str,
    short_header: Option<&'static str>,
    extract: Extractor<T>,
}

impl<T> ColumnSpec<T> {
    const fn with(header: &'static str, extract: Extractor<T>) -> Self {
        Self {
            header,
            short_header: None,
            extract,
        }
    }

    /// Text column.
    #[must_use]
    pub const fn text(header: &'static str, extract: fn(&T) -> String) -> Self {
        Self::with(header, Extractor::Text(extract))
    }

    /// Count column.
    #[must_use]
    pub const fn count(header: &'static str, extract: fn(&T) -> u64) -> Self {
        Self::with(header, Extractor::Count(extract))
    }

    /// Money column.
    #[must_use]
    pub const fn money(header: &'static str, extract: fn(&T) -> Decimal) -> Self {
        Self::with(header, Extractor::Money(extract))
    }

    /// Date column.
    #[must_use]
    pub const fn date(header: &'static str, extract: fn(&T) -> NaiveDate) -> Self {
        Self::with(header, Extractor::Date(extract))
    }

    /// Status column.
    #[must_use]
    pub const fn status(header: &'static str, extract: fn(&T) -> OrderStatus) -> Self {
        Self::with(header, Extractor::Status(extract))
    }

    /// Sets a shorter header used in documents.
    #[must_use]
    pub const fn short(mut self, header: &'static str) -> Self {
        self.short_header = Some(header);
        self
    }

    /// Header for the given target.
    #[must_use]
    pub fn header_for(&self, target: Target) -> &'static str {
        match target {
            Target::Spreadsheet => self.header,
            Target::Document => self.short_header.unwrap_or(self.header),
        }
    }

    /// Kind of value the column holds.
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        match self.extract {
            Extractor::Text(_) => CellKind::Text,
            Extractor::Count(_) => CellKind::Count,
            Extractor::Money(_) => CellKind::Money,
            Extractor::Date(_) => CellKind::Date,
            Extractor::Status(_) => CellKind::Status,
        }
    }

    /// Extracts the raw value from a record.
    pub fn value(&self, record: &T) -> CellValue {
        match self.extract {
            Extractor::Text(f) => CellValue::Text(f(record)),
            Extractor::Count(f) => CellValue::Count(f(record)),
            Extractor::Money(f) => CellValue::Money(f(record)),
            Extractor::Date(f) => CellValue::Date(f(record)),
            Extractor::Status(f) => CellValue::Status(f(record)),
        }
    }
}

/// Ordered column schema for one record type.
pub struct ReportSchema<T> {
    name: &'static str,
    version: u32,
    columns: Vec<ColumnSpec<T>>,
}

impl<T> ReportSchema<T> {
    /// Creates an empty schema.
    #[must_use]
    pub const fn new(name: &'static str, version: u32) -> Self {
        Self {
            name,
            version,
            columns: Vec::new(),
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, spec: ColumnSpec<T>) -> Self {
        self.columns.push(spec);
        self
    }

    /// Schema name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Schema version; bumped whenever the column set or order changes.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Column specifications in order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec<T>] {
        &self.columns
    }

    /// Renders records into a table, optionally followed by a totals row.
    ///
    /// The totals row puts `Total` in the first column, sums count and money
    /// columns, and fills every other column with `-`.
    pub fn render(&self, records: &[T], formatter: &CellFormatter, with_totals: bool) -> Table {
        let target = formatter.target();
        let columns = self
            .columns
            .iter()
            .map(|spec| Column {
                header: spec.header_for(target).to_string(),
                kind: spec.kind(),
            })
            .collect();

        let mut count_totals = vec![0u64; self.columns.len()];
        let mut money_totals = vec![Decimal::ZERO; self.columns.len()];

        let mut rows: Vec<Vec<String>> = records
            .iter()
            .map(|record| {
                self.columns
                    .iter()
                    .enumerate()
                    .map(|(i, spec)| {
                        let value = spec.value(record);
                        match value {
                            CellValue::Count(n) => count_totals[i] += n,
                            CellValue::Money(amount) => money_totals[i] += amount,
                            CellValue::Text(_) | CellValue::Date(_) | CellValue::Status(_) => {}
                        }
                        formatter.format(&value)
                    })
                    .collect()
            })
            .collect();

        if with_totals {
            let totals = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, spec)| {
                    if i == 0 {
                        TOTALS_LABEL.to_string()
                    } else {
                        formatter.total(spec.kind(), count_totals[i], money_totals[i])
                    }
                })
                .collect();
            rows.push(totals);
        }

        Table {
            columns,
            rows,
            has_totals: with_totals,
        }
    }
}
