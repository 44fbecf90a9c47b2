//! Amount type for loosely typed monetary values
//!
//! The ingestion pipeline writes totals and line item amounts as whatever the
//! OCR step produced: numbers, numeric strings, or junk. `Amount` keeps the
//! raw JSON value so display code can coerce it without ever failing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A monetary value exactly as it appeared in the response
///
/// `Amount(None)` means the key was missing; `Amount(Some(Value::Null))`
/// means it was present but null. The two coerce differently.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Amount(Option<Value>);

impl Amount {
    /// An amount whose key was missing from the record
    pub const fn absent() -> Self {
        Self(None)
    }

    /// Wrap a raw JSON value
    pub fn from_value(value: Value) -> Self {
        Self(Some(value))
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    pub fn raw(&self) -> Option<&Value> {
        self.0.as_ref()
    }

    /// Numeric coercion of the raw value
    ///
    /// Missing → NaN, null → 0, booleans → 0/1, numeric strings → their value
    /// (empty or blank → 0), anything unparseable → NaN.
    pub fn coerce(&self) -> f64 {
        match &self.0 {
            None => f64::NAN,
            Some(value) => coerce_value(value),
        }
    }

    /// The value as the pipeline typed it, for verbatim display
    pub fn verbatim(&self) -> Option<String> {
        match self.0.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(|n| Self::from_value(Value::Number(n)))
            .unwrap_or_else(|| Self::from_value(Value::Null))
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self::from_value(Value::String(value.to_string()))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

fn coerce_value(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => coerce_str(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            // A one-element list coerces through its string form
            [Value::Bool(_)] | [Value::Object(_)] => f64::NAN,
            [single] => coerce_value(single),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn coerce_str(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // f64::from_str also accepts "inf" and "nan"; only plain decimal literals count
    let is_decimal_literal = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !is_decimal_literal {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}
