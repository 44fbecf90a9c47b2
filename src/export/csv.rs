//! CSV Export functionality
//!
//! Writes the expense collection with the same columns as the pipeline's
//! monthly spreadsheet report.

use std::io::Write;

use crate::display::fixed_2;
use crate::error::{ViewerError, ViewerResult};
use crate::models::ExpenseRecord;

/// Column header of the expense CSV
pub const CSV_HEADER: [&str; 6] = ["ExpenseId", "Vendor", "Date", "Category", "Total", "ReceiptURL"];

/// Export all expenses to CSV
pub fn export_expenses_csv<W: Write>(records: &[ExpenseRecord], writer: W) -> ViewerResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(|e| ViewerError::Export(e.to_string()))?;

    for record in records {
        let total = fixed_2(record.total.coerce());
        csv_writer
            .write_record([
                record.id.as_deref().unwrap_or(""),
                record.vendor.as_deref().unwrap_or(""),
                record.date.as_deref().unwrap_or(""),
                record.category.as_deref().unwrap_or(""),
                // Empty rather than NaN so spreadsheets treat the cell as blank
                if total == "NaN" { "" } else { total.as_str() },
                record.receipt_path.as_deref().unwrap_or(""),
            ])
            .map_err(|e| ViewerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ViewerError::Export(e.to_string()))?;

    Ok(())
}
