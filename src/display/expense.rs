//! Expense display formatting
//!
//! Shared by the TUI and the non-interactive commands. Nothing here can
//! fail: every missing or malformed field collapses to a placeholder.

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Amount, ExpenseRecord, LineItem};

/// Shown in place of any missing value
pub const PLACEHOLDER: &str = "—";

/// Vendor name or placeholder
pub fn vendor_text(record: &ExpenseRecord) -> String {
    non_empty(record.vendor.as_deref()).unwrap_or(PLACEHOLDER).to_string()
}

/// Date portion (first 10 characters) of the receipt date
pub fn date_text(record: &ExpenseRecord) -> String {
    prefix_or_placeholder(record.date.as_deref(), 10)
}

/// Creation timestamp to the second, with the `T` separator as a space
pub fn created_at_text(record: &ExpenseRecord) -> String {
    match non_empty(record.created_at.as_deref()) {
        Some(ts) => take_chars(ts, 19).replacen('T', " ", 1),
        None => PLACEHOLDER.to_string(),
    }
}

/// Storage locator, verbatim
pub fn receipt_path_text(record: &ExpenseRecord) -> String {
    non_empty(record.receipt_path.as_deref())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

pub fn category_text(record: &ExpenseRecord) -> String {
    non_empty(record.category.as_deref())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

/// Coerced amount with exactly two decimals, e.g. `$12.50` or `$NaN`
pub fn money_text(amount: &Amount, symbol: &str) -> String {
    format!("{}{}", symbol, fixed_2(amount.coerce()))
}

/// Coerced amount with two decimals and no currency marker
pub fn fixed_2(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else {
        let text = format!("{:.2}", value);
        // -0.001 rounds to "-0.00"; show it unsigned
        if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
            text.trim_start_matches('-').to_string()
        } else {
            text
        }
    }
}

/// Line item as `description $amount`, amount shown as typed
pub fn line_item_text(item: &LineItem, symbol: &str) -> String {
    format!(
        "{} {}",
        line_item_description(item),
        line_item_amount(item, symbol)
    )
}

pub fn line_item_description(item: &LineItem) -> String {
    non_empty(item.description.as_deref())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

pub fn line_item_amount(item: &LineItem, symbol: &str) -> String {
    match item.amount.verbatim() {
        Some(amount) => format!("{}{}", symbol, amount),
        None => PLACEHOLDER.to_string(),
    }
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Line Items")]
    line_items: String,
}

/// Format the collection as a table for the `list` command
pub fn format_expense_table(records: &[ExpenseRecord], symbol: &str) -> String {
    if records.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = records.iter().map(|record| {
        let items = record.line_items();
        ExpenseRow {
            vendor: vendor_text(record),
            date: date_text(record),
            total: money_text(&record.total, symbol),
            line_items: if items.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                items
                    .iter()
                    .map(|item| line_item_text(item, symbol))
                    .collect::<Vec<_>>()
                    .join("\n")
            },
        }
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn prefix_or_placeholder(value: Option<&str>, len: usize) -> String {
    match non_empty(value) {
        Some(v) => take_chars(v, len),
        None => PLACEHOLDER.to_string(),
    }
}

fn take_chars(value: &str, len: usize) -> String {
    value.chars().take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> ExpenseRecord {
        serde_json::from_str(
            r#"{"Vendor":"Acme","Total":"12.5","LineItems":[{"Description":"Pens","Amount":"12.50"}]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_acme_row_fields() {
        let record = acme();
        assert_eq!(vendor_text(&record), "Acme");
        assert_eq!(money_text(&record.total, "$"), "$12.50");
        assert_eq!(line_item_text(&record.line_items()[0], "$"), "Pens $12.50");
        assert_eq!(receipt_path_text(&record), PLACEHOLDER);
        assert_eq!(created_at_text(&record), PLACEHOLDER);
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let record = ExpenseRecord::default();
        assert_eq!(vendor_text(&record), PLACEHOLDER);
        assert_eq!(date_text(&record), PLACEHOLDER);
        assert_eq!(category_text(&record), PLACEHOLDER);
        assert!(record.line_items().is_empty());
    }

    #[test]
    fn test_non_numeric_total() {
        let record: ExpenseRecord = serde_json::from_str(r#"{"Total":"not-a-number"}"#).unwrap();
        assert_eq!(money_text(&record.total, "$"), "$NaN");
        assert_eq!(money_text(&Amount::absent(), "$"), "$NaN");
        assert_eq!(money_text(&Amount::from_value(serde_json::Value::Null), "$"), "$0.00");
    }

    #[test]
    fn test_fixed_2_edge_values() {
        assert_eq!(fixed_2(3.0), "3.00");
        assert_eq!(fixed_2(-4.5), "-4.50");
        assert_eq!(fixed_2(-0.0), "0.00");
        assert_eq!(fixed_2(-0.001), "0.00");
        assert_eq!(fixed_2(f64::INFINITY), "Infinity");
        assert_eq!(fixed_2(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_dates_are_truncated() {
        let record = ExpenseRecord {
            date: Some("2024-03-02T18:21:07".into()),
            created_at: Some("2024-03-02T18:21:07.123456".into()),
            ..Default::default()
        };
        assert_eq!(date_text(&record), "2024-03-02");
        assert_eq!(created_at_text(&record), "2024-03-02 18:21:07");
    }

    #[test]
    fn test_short_and_empty_dates() {
        let short = ExpenseRecord {
            date: Some("03/02/24".into()),
            created_at: Some("2024-03-02".into()),
            ..Default::default()
        };
        assert_eq!(date_text(&short), "03/02/24");
        assert_eq!(created_at_text(&short), "2024-03-02");

        let empty = ExpenseRecord {
            date: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(date_text(&empty), PLACEHOLDER);
    }

    #[test]
    fn test_line_item_placeholders() {
        let item = LineItem::default();
        assert_eq!(line_item_text(&item, "$"), "— —");
        assert_eq!(line_item_text(&LineItem::new("Tape", 2.0), "$"), "Tape $2.0");
    }

    #[test]
    fn test_format_expense_table() {
        let output = format_expense_table(&[acme(), ExpenseRecord::default()], "$");
        assert!(output.contains("Vendor"));
        assert!(output.contains("Acme"));
        assert!(output.contains("$12.50"));
        assert!(output.contains("Pens $12.50"));
        assert!(output.contains("$NaN"));
    }

    #[test]
    fn test_format_empty_table() {
        assert_eq!(format_expense_table(&[], "$"), "No expenses found.\n");
    }
}
