//! Application configuration management.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Reporting configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Export configuration.
    #[serde(default)]
    pub export: ExportConfig,
    /// Data source configuration.
    #[serde(default)]
    pub data: DataConfig,
}

/// Reporting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Currency used when rendering monetary values.
    #[serde(default)]
    pub currency: Currency,
    /// Share of the payable/revenue amount reported as balance.
    #[serde(default = "default_balance_ratio")]
    pub balance_ratio: Decimal,
}

fn default_balance_ratio() -> Decimal {
    Decimal::new(10, 2) // 0.10
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            balance_ratio: default_balance_ratio(),
        }
    }
}

/// Artifact format produced by an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Excel workbook.
    Xlsx,
    /// PDF document.
    Pdf,
}

impl ExportFormat {
    /// Returns the file extension without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory artifacts are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Formats to produce for each report.
    #[serde(default = "default_formats")]
    pub formats: Vec<ExportFormat>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exports")
}

fn default_formats() -> Vec<ExportFormat> {
    vec![ExportFormat::Xlsx, ExportFormat::Pdf]
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: default_formats(),
        }
    }
}

/// Data source configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// JSON fixture file; the embedded fixture is used when unset.
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CLINICDASH").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.reporting.currency, Currency::Usd);
        assert_eq!(config.reporting.balance_ratio, dec!(0.10));
        assert_eq!(config.export.output_dir, PathBuf::from("exports"));
        assert_eq!(
            config.export.formats,
            vec![ExportFormat::Xlsx, ExportFormat::Pdf]
        );
        assert!(config.data.fixture_path.is_none());
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "CLINICDASH__REPORTING__BALANCE_RATIO",
                "CLINICDASH__REPORTING__CURRENCY",
                "CLINICDASH__EXPORT__OUTPUT_DIR",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.reporting.balance_ratio, dec!(0.10));
                assert_eq!(config.export.output_dir, PathBuf::from("exports"));
            },
        );
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("CLINICDASH__REPORTING__BALANCE_RATIO", Some("0.25")),
                ("CLINICDASH__REPORTING__CURRENCY", Some("EUR")),
                ("CLINICDASH__EXPORT__OUTPUT_DIR", Some("/tmp/reports")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.reporting.balance_ratio, dec!(0.25));
                assert_eq!(config.reporting.currency, Currency::Eur);
                assert_eq!(config.export.output_dir, PathBuf::from("/tmp/reports"));
            },
        );
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Xlsx.extension(), "xlsx");
        assert_eq!(ExportFormat::Pdf.extension(), "pdf");
    }
}
