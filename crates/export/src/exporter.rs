//! Format dispatch and artifact writing.

use std::fs;
use std::path::{Path, PathBuf};

use clinicdash_core::reports::Report;
use clinicdash_shared::config::{ExportConfig, ExportFormat};
use tracing::{debug, info};

use crate::document::DocumentEmitter;
use crate::error::ExportError;
use crate::spreadsheet::SpreadsheetEmitter;

/// Writes report artifacts into an output directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    /// Creates an exporter writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Creates an exporter from export configuration.
    #[must_use]
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.output_dir.clone())
    }

    /// Directory artifacts are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Renders the report in the given format.
    ///
    /// # Errors
    ///
    /// Returns the emitter's error.
    pub fn render(report: &Report, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        match format {
            ExportFormat::Xlsx => SpreadsheetEmitter::emit(report),
            ExportFormat::Pdf => DocumentEmitter::emit(report),
        }
    }

    /// Renders the report and writes it to the output directory.
    ///
    /// Uses the report's default file name unless `filename` is given. The
    /// extension always follows the format.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the file cannot be written.
    pub fn export(
        &self,
        report: &Report,
        format: ExportFormat,
        filename: Option<&str>,
    ) -> Result<PathBuf, ExportError> {
        let bytes = Self::render(report, format)?;

        let name = filename.map_or_else(
            || report.default_filename(format),
            |stem| format!("{stem}.{}", format.extension()),
        );
        let path = self.output_dir.join(name);

        debug!(dir = %self.output_dir.display(), "Ensuring output directory");
        fs::create_dir_all(&self.output_dir)?;
        fs::write(&path, &bytes)?;

        info!(report = %report.kind, path = %path.display(), bytes = bytes.len(), "Wrote artifact");
        Ok(path)
    }
}
