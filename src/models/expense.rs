//! Expense record model
//!
//! Records are produced by the receipt-ingestion pipeline and are never
//! modified here. Every field is optional and decoded leniently: a record
//! with missing or oddly typed fields still renders, it just shows
//! placeholders.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::amount::Amount;

/// One purchased item on a receipt
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(
        rename = "Description",
        alias = "description",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        rename = "Amount",
        alias = "amount",
        default,
        skip_serializing_if = "Amount::is_absent"
    )]
    pub amount: Amount,
}

impl LineItem {
    pub fn new(description: impl Into<String>, amount: impl Into<Amount>) -> Self {
        Self {
            description: Some(description.into()),
            amount: amount.into(),
        }
    }
}

/// Structured data extracted from one receipt
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(
        rename = "ExpenseId",
        alias = "id",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(
        rename = "Vendor",
        alias = "vendor",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub vendor: Option<String>,

    /// ISO-8601 date or date-time
    #[serde(
        rename = "Date",
        alias = "date",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,

    #[serde(
        rename = "Total",
        alias = "total",
        default,
        skip_serializing_if = "Amount::is_absent"
    )]
    pub total: Amount,

    #[serde(
        rename = "Category",
        alias = "category",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,

    /// Storage locator of the original receipt image
    #[serde(
        rename = "ReceiptS3Path",
        alias = "receiptPath",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub receipt_path: Option<String>,

    /// ISO-8601 date-time the record was written
    #[serde(
        rename = "CreatedAt",
        alias = "createdAt",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    #[serde(
        rename = "LineItems",
        alias = "lineItems",
        default,
        deserialize_with = "lenient_line_items",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_items: Option<Vec<LineItem>>,
}

/// Identity of a rendered row
///
/// Rows are identified by the record id when it has one, otherwise by their
/// position in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Id(String),
    Index(usize),
}

impl ExpenseRecord {
    /// Identity of this record when displayed at `index`
    pub fn row_key(&self, index: usize) -> RowKey {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => RowKey::Id(id.to_string()),
            _ => RowKey::Index(index),
        }
    }

    /// Line items, or an empty slice when the field is missing
    pub fn line_items(&self) -> &[LineItem] {
        self.line_items.as_deref().unwrap_or(&[])
    }
}

/// Accept strings, numbers and booleans; treat everything else as missing
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_line_items<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<LineItem>>, D::Error> {
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(None),
    };

    Ok(Some(
        items
            .into_iter()
            .map(|item| match item {
                Value::Object(_) => serde_json::from_value(item).unwrap_or_default(),
                _ => LineItem::default(),
            })
            .collect(),
    ))
}
