//! PDF emission.
//!
//! A document page is laid out top-down in millimetres on A4 portrait:
//!
//! | Element          | Offset from top            | Font size |
//! |------------------|----------------------------|-----------|
//! | Title            | 22                         | 18        |
//! | `Generated: ...` | 32                         | 11        |
//! | Summary line `n` | 42 + 8n                    | 12        |
//! | Table            | 40, or 2 below the summary | 9         |
//!
//! The table uses a grid with a teal header row. Rows that do not fit move to
//! a new page, which repeats the header row at the top margin. A summary too
//! long to leave room for a header and one row pushes the whole table to the
//! second page.

// Layout is geometry in millimetres; printpdf only takes f32.
#![allow(
    clippy::float_arithmetic,
    clippy::float_cmp,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use std::ops::Range;

use clinicdash_core::reports::{Report, Target};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};
use tracing::{info, warn};

use crate::error::ExportError;

/// A4 width.
pub const PAGE_WIDTH: f32 = 210.0;
/// A4 height.
pub const PAGE_HEIGHT: f32 = 297.0;
/// Left and right margin.
pub const MARGIN_X: f32 = 14.0;
/// Top margin of continuation pages.
pub const TOP_MARGIN: f32 = 15.0;
/// Space kept free at the bottom of every page.
pub const BOTTOM_MARGIN: f32 = 15.0;

/// Title baseline.
pub const TITLE_Y: f32 = 22.0;
/// Title font size.
pub const TITLE_SIZE: f32 = 18.0;
/// Generated timestamp baseline.
pub const GENERATED_Y: f32 = 32.0;
/// Generated timestamp font size.
pub const GENERATED_SIZE: f32 = 11.0;
/// Baseline of the first summary line.
pub const SUMMARY_START_Y: f32 = 42.0;
/// Distance between summary lines.
pub const SUMMARY_STEP: f32 = 8.0;
/// Summary font size.
pub const SUMMARY_SIZE: f32 = 12.0;
/// Table top when there is no summary.
pub const TABLE_START_Y: f32 = 40.0;
/// Gap between the last summary line and the table.
pub const TABLE_GAP: f32 = 2.0;

/// Height of one table row.
pub const ROW_HEIGHT: f32 = 8.0;
/// Table cell font size.
pub const CELL_SIZE: f32 = 9.0;
/// Horizontal cell padding.
pub const CELL_PADDING: f32 = 1.5;
/// Header row fill.
pub const HEADER_FILL: [u8; 3] = [20, 184, 166];
/// Grid line color.
pub const GRID_COLOR: [u8; 3] = [200, 200, 200];

const PT_TO_MM: f32 = 0.3528;
// Average Helvetica glyph width relative to the font size.
const GLYPH_WIDTH_EM: f32 = 0.5;

/// Returns the table top for a given number of summary lines.
#[must_use]
pub fn table_start_y(summary_lines: usize) -> f32 {
    if summary_lines == 0 {
        TABLE_START_Y
    } else {
        SUMMARY_START_Y + SUMMARY_STEP * summary_lines as f32 + TABLE_GAP
    }
}

/// Truncates text so it fits a cell of the given width.
#[must_use]
pub fn fit_text(text: &str, width: f32, size: f32) -> String {
    let glyph = size * PT_TO_MM * GLYPH_WIDTH_EM;
    let max_chars = ((width - 2.0 * CELL_PADDING) / glyph).floor().max(0.0) as usize;

    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut fitted: String = text.chars().take(max_chars - 3).collect();
    fitted.push_str("...");
    fitted
}

/// A positioned line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Text content.
    pub text: String,
    /// Font size in points.
    pub size: f32,
    /// Baseline offset from the top of the page.
    pub y: f32,
}

/// Table rows placed on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSlice {
    /// Zero-based page index.
    pub page: usize,
    /// Top of the header row.
    pub top: f32,
    /// Indices into the table rows.
    pub rows: Range<usize>,
}

/// Page layout of a report document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    /// Title line.
    pub title: TextLine,
    /// `Generated: ...` line.
    pub generated: TextLine,
    /// Summary lines in order.
    pub summary: Vec<TextLine>,
    /// Left edge of each column.
    pub column_x: Vec<f32>,
    /// Width shared by all columns.
    pub column_width: f32,
    /// Table rows per page; always at least one page.
    pub slices: Vec<TableSlice>,
}

impl DocumentLayout {
    /// Lays out a report.
    #[must_use]
    pub fn for_report(report: &Report) -> Self {
        let summary = report
            .summary
            .iter()
            .enumerate()
            .map(|(i, line)| TextLine {
                text: line.to_string(),
                size: SUMMARY_SIZE,
                y: SUMMARY_START_Y + SUMMARY_STEP * i as f32,
            })
            .collect();

        let width = report.table.width().max(1);
        let column_width = (PAGE_WIDTH - 2.0 * MARGIN_X) / width as f32;
        let column_x = (0..report.table.width())
            .map(|i| MARGIN_X + column_width * i as f32)
            .collect();

        Self {
            title: TextLine {
                text: report.title.clone(),
                size: TITLE_SIZE,
                y: TITLE_Y,
            },
            generated: TextLine {
                text: report.generated_line(),
                size: GENERATED_SIZE,
                y: GENERATED_Y,
            },
            summary,
            column_x,
            column_width,
            slices: paginate(
                report.table.rows.len(),
                table_start_y(report.summary.len()),
            ),
        }
    }

    /// Top of the table where it starts.
    #[must_use]
    pub fn table_top(&self) -> f32 {
        self.slices.first().map_or(TABLE_START_Y, |s| s.top)
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.slices.last().map_or(1, |s| s.page + 1)
    }
}

/// Data rows that fit below a header row starting at `top`.
fn rows_below(top: f32) -> usize {
    let fits = ((PAGE_HEIGHT - BOTTOM_MARGIN - top) / ROW_HEIGHT).floor().max(0.0) as usize;
    fits.saturating_sub(1)
}

/// Splits `row_count` rows across pages, leaving room for a header per page.
fn paginate(row_count: usize, first_top: f32) -> Vec<TableSlice> {
    let mut slices = Vec::new();
    let (mut page, mut top) = if rows_below(first_top) == 0 {
        (1, TOP_MARGIN)
    } else {
        (0, first_top)
    };
    let mut next = 0;

    loop {
        let end = (next + rows_below(top).max(1)).min(row_count);
        slices.push(TableSlice {
            page,
            top,
            rows: next..end,
        });
        next = end;
        if next >= row_count {
            return slices;
        }
        page += 1;
        top = TOP_MARGIN;
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

/// Page coordinate for an offset from the top.
fn from_top(y: f32) -> Mm {
    Mm(PAGE_HEIGHT - y)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Writes reports as paginated PDF documents.
pub struct DocumentEmitter;

impl DocumentEmitter {
    /// Emits the report as PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the report was not formatted for documents, the
    /// table is ragged, or the PDF cannot be written.
    pub fn emit(report: &Report) -> Result<Vec<u8>, ExportError> {
        if report.target != Target::Document {
            warn!(
                report = %report.kind,
                target = ?report.target,
                "Rejected report for document"
            );
            return Err(ExportError::TargetMismatch {
                expected: Target::Document,
                actual: report.target,
            });
        }
        if let Err(err) = report.table.validate() {
            warn!(report = %report.kind, error = %err, "Rejected malformed table");
            return Err(err.into());
        }

        let layout = DocumentLayout::for_report(report);
        let (doc, page, layer) = PdfDocument::new(
            report.title.as_str(),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Layer 1",
        );
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(ExportError::document)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(ExportError::document)?,
        };

        let mut layers = vec![doc.get_page(page).get_layer(layer)];
        for number in 2..=layout.page_count() {
            let (page, layer) = doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Page {number}"),
            );
            layers.push(doc.get_page(page).get_layer(layer));
        }

        if let Some(first) = layers.first() {
            Self::draw_heading(first, &layout, &fonts);
        }
        for slice in &layout.slices {
            if let Some(canvas) = layers.get(slice.page) {
                Self::draw_table(canvas, &layout, report, slice, &fonts);
            }
        }

        let bytes = doc.save_to_bytes().map_err(ExportError::document)?;
        info!(
            report = %report.kind,
            rows = report.table.rows.len(),
            pages = layout.page_count(),
            bytes = bytes.len(),
            "Emitted document"
        );
        Ok(bytes)
    }

    fn draw_heading(canvas: &PdfLayerReference, layout: &DocumentLayout, fonts: &Fonts) {
        canvas.set_fill_color(rgb([0, 0, 0]));
        Self::draw_line(canvas, &layout.title, &fonts.bold);
        Self::draw_line(canvas, &layout.generated, &fonts.regular);
        for line in &layout.summary {
            Self::draw_line(canvas, line, &fonts.regular);
        }
    }

    fn draw_line(canvas: &PdfLayerReference, line: &TextLine, font: &IndirectFontRef) {
        canvas.use_text(
            line.text.as_str(),
            line.size,
            Mm(MARGIN_X),
            from_top(line.y),
            font,
        );
    }

    fn draw_table(
        canvas: &PdfLayerReference,
        layout: &DocumentLayout,
        report: &Report,
        slice: &TableSlice,
        fonts: &Fonts,
    ) {
        let table = &report.table;
        canvas.set_outline_color(rgb(GRID_COLOR));
        canvas.set_outline_thickness(0.1);

        let headers = table.headers();
        Self::draw_row(canvas, layout, slice.top, &headers, RowStyle::Header, fonts);

        let totals_index = table.has_totals.then(|| table.rows.len().saturating_sub(1));
        let mut top = slice.top + ROW_HEIGHT;
        for index in slice.rows.clone() {
            let cells: Vec<&str> = table.rows[index].iter().map(String::as_str).collect();
            let style = if Some(index) == totals_index {
                RowStyle::Totals
            } else {
                RowStyle::Body
            };
            Self::draw_row(canvas, layout, top, &cells, style, fonts);
            top += ROW_HEIGHT;
        }
    }

    fn draw_row(
        canvas: &PdfLayerReference,
        layout: &DocumentLayout,
        top: f32,
        cells: &[&str],
        style: RowStyle,
        fonts: &Fonts,
    ) {
        let (mode, text_color, font) = match style {
            RowStyle::Header => {
                canvas.set_fill_color(rgb(HEADER_FILL));
                (PaintMode::FillStroke, [255, 255, 255], &fonts.bold)
            }
            RowStyle::Body => (PaintMode::Stroke, [0, 0, 0], &fonts.regular),
            RowStyle::Totals => (PaintMode::Stroke, [0, 0, 0], &fonts.bold),
        };

        for &x in &layout.column_x {
            canvas.add_rect(
                Rect::new(
                    Mm(x),
                    from_top(top + ROW_HEIGHT),
                    Mm(x + layout.column_width),
                    from_top(top),
                )
                .with_mode(mode),
            );
        }

        canvas.set_fill_color(rgb(text_color));
        for (&x, cell) in layout.column_x.iter().zip(cells) {
            canvas.use_text(
                fit_text(cell, layout.column_width, CELL_SIZE),
                CELL_SIZE,
                Mm(x + CELL_PADDING),
                from_top(top + ROW_HEIGHT - 2.6),
                font,
            );
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RowStyle {
    Header,
    Body,
    Totals,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clinicdash_core::reports::{CellKind, Column, ReportKind, SummaryLine, Table};

    fn report(summary: usize, rows: usize) -> Report {
        Report {
            kind: ReportKind::CreditBilling,
            target: Target::Document,
            title: "Credit Billing Report".to_string(),
            sheet_name: "Credit Usage".to_string(),
            file_stem: "credit_billing".to_string(),
            generated_at: NaiveDate::from_ymd_opt(2024, 2, 5)
                .unwrap()
                .and_hms_opt(15, 4, 5)
                .unwrap(),
            summary: (0..summary)
                .map(|i| SummaryLine::new(format!("Line {i}"), "1"))
                .collect(),
            table: Table {
                columns: vec![
                    Column {
                        header: "Clinic".to_string(),
                        kind: CellKind::Text,
                    },
                    Column {
                        header: "Credits".to_string(),
                        kind: CellKind::Count,
                    },
                ],
                rows: (0..rows).map(|i| vec![format!("Clinic {i}"), "10".into()]).collect(),
                has_totals: false,
            },
        }
    }

    #[test]
    fn test_table_start_without_summary() {
        assert_eq!(table_start_y(0), TABLE_START_Y);
        assert_eq!(DocumentLayout::for_report(&report(0, 1)).table_top(), 40.0);
    }

    #[test]
    fn test_table_start_below_summary() {
        assert_eq!(table_start_y(2), 60.0);
        assert_eq!(table_start_y(4), 76.0);
    }

    #[test]
    fn test_heading_positions() {
        let layout = DocumentLayout::for_report(&report(2, 1));

        assert_eq!(layout.title.y, 22.0);
        assert_eq!(layout.title.size, 18.0);
        assert_eq!(layout.generated.text, "Generated: Feb 5, 2024, 3:04:05 PM");
        assert_eq!(layout.generated.y, 32.0);
        assert_eq!(layout.summary[0].y, 42.0);
        assert_eq!(layout.summary[1].y, 50.0);
        assert_eq!(layout.summary[1].text, "Line 1: 1");
    }

    #[test]
    fn test_columns_span_printable_width() {
        let layout = DocumentLayout::for_report(&report(0, 1));

        assert_eq!(layout.column_x, vec![14.0, 105.0]);
        assert_eq!(layout.column_width, 91.0);
    }

    #[test]
    fn test_single_page_for_short_table() {
        let layout = DocumentLayout::for_report(&report(2, 9));

        assert_eq!(layout.page_count(), 1);
        assert_eq!(layout.slices[0].rows, 0..9);
    }

    #[test]
    fn test_empty_table_still_gets_a_page() {
        let layout = DocumentLayout::for_report(&report(0, 0));

        assert_eq!(layout.page_count(), 1);
        assert!(layout.slices[0].rows.is_empty());
    }

    #[test]
    fn test_long_table_paginates_without_losing_rows() {
        let layout = DocumentLayout::for_report(&report(2, 100));

        assert!(layout.page_count() > 1);
        assert_eq!(layout.slices[0].rows.start, 0);
        assert_eq!(layout.slices.last().unwrap().rows.end, 100);
        for pair in layout.slices.windows(2) {
            assert_eq!(pair[0].rows.end, pair[1].rows.start);
            assert_eq!(pair[0].page + 1, pair[1].page);
            assert_eq!(pair[1].top, TOP_MARGIN);
        }
    }

    #[test]
    fn test_long_summary_moves_table_to_next_page() {
        // 40 summary lines put the table top at 364mm, below the page
        let layout = DocumentLayout::for_report(&report(40, 3));

        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.slices.len(), 1);
        assert_eq!(layout.slices[0].page, 1);
        assert_eq!(layout.table_top(), TOP_MARGIN);
        assert_eq!(layout.slices[0].rows, 0..3);
    }

    #[test]
    fn test_emit_with_table_on_second_page() {
        let bytes = DocumentEmitter::emit(&report(40, 3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_table_stays_on_first_page_when_one_row_fits() {
        // 27 summary lines: table top 260mm leaves room for header and one row
        let layout = DocumentLayout::for_report(&report(27, 2));

        assert_eq!(layout.slices[0].page, 0);
        assert_eq!(layout.slices[0].rows, 0..1);
        assert_eq!(layout.slices[1].page, 1);
        assert_eq!(layout.page_count(), 2);
    }

    #[test]
    fn test_fit_text() {
        assert_eq!(fit_text("Central", 91.0, CELL_SIZE), "Central");

        let fitted = fit_text(&"x".repeat(200), 20.0, CELL_SIZE);
        assert!(fitted.ends_with("..."));
        assert!(fitted.len() < 200);
    }
}
