//! Expense sources
//!
//! The retrieval call behind a trait so the TUI can be driven by a canned
//! source in tests and by the HTTP endpoint in production.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::error::{ViewerError, ViewerResult};
use crate::models::ExpenseRecord;

/// Something that can produce the current expense collection
pub trait ExpenseSource: Send + 'static {
    /// Retrieve the whole collection in server order
    fn fetch(&self) -> ViewerResult<Vec<ExpenseRecord>>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// The expenses collection endpoint
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ExpenseSource for HttpSource {
    fn fetch(&self) -> ViewerResult<Vec<ExpenseRecord>> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ViewerError::Transport(e.to_string()))?;

        info!(url = %self.url, "requesting expenses");
        let response = client.get(&self.url).send()?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "expenses endpoint refused");
            return Err(ViewerError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text()?;
        debug!(bytes = body.len(), "expenses response received");
        decode_expenses(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// A fixed collection (or failure), used for demos and tests
#[derive(Debug, Clone)]
pub struct StaticSource {
    result: ViewerResult<Vec<ExpenseRecord>>,
    delay: Duration,
}

impl StaticSource {
    pub fn new(records: Vec<ExpenseRecord>) -> Self {
        Self {
            result: Ok(records),
            delay: Duration::ZERO,
        }
    }

    pub fn failing(error: ViewerError) -> Self {
        Self {
            result: Err(error),
            delay: Duration::ZERO,
        }
    }

    /// Simulate network latency
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl ExpenseSource for StaticSource {
    fn fetch(&self) -> ViewerResult<Vec<ExpenseRecord>> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.result.clone()
    }

    fn describe(&self) -> String {
        "static source".to_string()
    }
}

/// Decode a response body into expense records
///
/// The body must be a JSON array of objects; individual fields are decoded
/// leniently.
pub fn decode_expenses(body: &str) -> ViewerResult<Vec<ExpenseRecord>> {
    serde_json::from_str(body).map_err(|e| ViewerError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_preserves_order() {
        let body = r#"[{"Vendor":"B"},{"Vendor":"A"},{"Vendor":"C"}]"#;
        let records = decode_expenses(body).unwrap();
        let vendors: Vec<_> = records.iter().map(|r| r.vendor.as_deref().unwrap()).collect();
        assert_eq!(vendors, ["B", "A", "C"]);
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode_expenses("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_non_arrays() {
        let err = decode_expenses(r#"{"error": "boom"}"#).unwrap_err();
        assert!(matches!(err, ViewerError::Decode(_)));

        assert!(decode_expenses("<html>502</html>").is_err());
        assert!(decode_expenses("[1, 2]").is_err());
    }

    #[test]
    fn test_static_source() {
        let source = StaticSource::new(vec![ExpenseRecord::default()]);
        assert_eq!(source.fetch().unwrap().len(), 1);

        let failing = StaticSource::failing(ViewerError::Transport("refused".into()));
        assert!(failing.fetch().unwrap_err().is_fetch_failure());
    }

    #[test]
    fn test_http_source_unreachable() {
        // Port 9 (discard) is closed on test machines; the call must fail, not hang
        let source = HttpSource::new("http://127.0.0.1:9/expenses", Duration::from_secs(2));
        let err = source.fetch().unwrap_err();
        assert!(err.is_fetch_failure());
    }
}
