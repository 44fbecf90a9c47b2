//! Custom error types for SnapTrack
//!
//! This module defines the error hierarchy for the viewer using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for SnapTrack operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// The expenses endpoint could not be reached
    #[error("Network error: {0}")]
    Transport(String),

    /// The expenses endpoint answered with a non-success status
    #[error("Endpoint {url} returned HTTP {status}")]
    Status { status: u16, url: String },

    /// The response body was not a list of expense records
    #[error("Malformed expense data: {0}")]
    Decode(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl ViewerError {
    /// Create the error returned when no endpoint has been configured
    pub fn missing_endpoint() -> Self {
        Self::Config(
            "No expenses endpoint configured. Pass --endpoint, set SNAPTRACK_ENDPOINT, \
             or run 'snaptrack config set-endpoint <URL>'"
                .into(),
        )
    }

    /// Check if this error came out of the retrieval call
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::Decode(_)
        )
    }

    /// Short label for the status bar
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Transport(_) => "endpoint unreachable",
            Self::Status { .. } => "endpoint returned an error",
            Self::Decode(_) => "unreadable response",
            Self::Config(_) => "configuration problem",
            Self::Io(_) | Self::Json(_) | Self::Export(_) | Self::Tui(_) => "internal error",
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for ViewerError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None if err.is_decode() => Self::Decode(err.to_string()),
            None => Self::Transport(err.to_string()),
        }
    }
}

/// Result type alias for SnapTrack operations
pub type ViewerResult<T> = Result<T, ViewerError>;
