//! JSON Export functionality
//!
//! Exports the fetched expense collection with a small metadata envelope.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ViewerError, ViewerResult};
use crate::models::ExpenseRecord;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Exported expense snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Endpoint the collection was retrieved from
    pub source: String,

    pub expense_count: usize,

    /// Expenses in server order
    pub expenses: Vec<ExpenseRecord>,
}

impl ExpenseExport {
    pub fn new(source: impl Into<String>, expenses: Vec<ExpenseRecord>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            source: source.into(),
            expense_count: expenses.len(),
            expenses,
        }
    }
}

/// Export the snapshot as pretty-printed JSON
pub fn export_expenses_json<W: Write>(export: &ExpenseExport, writer: &mut W) -> ViewerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| ViewerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ViewerError::Export(e.to_string()))?;
    Ok(())
}
