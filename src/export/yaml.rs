//! YAML Export functionality
//!
//! Same snapshot as the JSON export, for reading by humans.

use std::io::Write;

use crate::error::{ViewerError, ViewerResult};
use crate::export::json::ExpenseExport;

/// Export the snapshot to YAML with a short header comment
pub fn export_expenses_yaml<W: Write>(export: &ExpenseExport, writer: &mut W) -> ViewerResult<()> {
    let header = format!(
        "# SnapTrack expense export\n# Generated: {}\n# Source: {}\n\n",
        export.exported_at, export.source
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| ViewerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| ViewerError::Export(e.to_string()))?;

    Ok(())
}
