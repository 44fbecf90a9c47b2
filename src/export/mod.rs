//! Export module for SnapTrack
//!
//! Writes a fetched expense snapshot in one of several formats:
//! - CSV: the monthly-report columns (spreadsheet-compatible)
//! - JSON: machine-readable snapshot with metadata
//! - YAML: human-readable snapshot with metadata

pub mod csv;
pub mod json;
pub mod yaml;

use std::io::Write;

use chrono::{DateTime, Local};
use clap::ValueEnum;

use crate::error::ViewerResult;
use crate::models::ExpenseRecord;

pub use self::csv::{export_expenses_csv, CSV_HEADER};
pub use self::json::{export_expenses_json, ExpenseExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_expenses_yaml;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Default file name, one per month like the pipeline's reports
    pub fn default_file_name(&self, now: DateTime<Local>) -> String {
        format!("expenses_{}.{}", now.format("%Y-%m"), self.extension())
    }
}

/// Write `records` in `format`
pub fn export_expenses<W: Write>(
    format: ExportFormat,
    source: &str,
    records: Vec<ExpenseRecord>,
    writer: &mut W,
) -> ViewerResult<()> {
    match format {
        ExportFormat::Csv => export_expenses_csv(&records, writer),
        ExportFormat::Json => export_expenses_json(&ExpenseExport::new(source, records), writer),
        ExportFormat::Yaml => export_expenses_yaml(&ExpenseExport::new(source, records), writer),
    }
}

/// Summary line written to stderr after an export to a file
pub fn export_summary(format: ExportFormat, records: &[ExpenseRecord]) -> String {
    let noun = if records.len() == 1 { "expense" } else { "expenses" };
    let summary = format!("{} {} exported as {}", records.len(), noun, format.extension());

    // Only CSV blanks totals it cannot read; JSON and YAML keep the raw value
    let unreadable = match format {
        ExportFormat::Csv => records
            .iter()
            .filter(|r| r.total.coerce().is_nan())
            .count(),
        ExportFormat::Json | ExportFormat::Yaml => 0,
    };

    if unreadable == 0 {
        summary
    } else {
        format!(
            "{} ({} with an unreadable total left blank)",
            summary, unreadable
        )
    }
}
