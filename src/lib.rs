//! SnapTrack - terminal viewer for automatically extracted receipt expenses
//!
//! Receipts are uploaded and processed elsewhere; this crate retrieves the
//! resulting expense records from an HTTP endpoint once per session and
//! presents them as a list with a per-record detail overlay. It never writes
//! back to the endpoint.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expense records and loosely typed amounts
//! - `fetch`: The single retrieval call and its background worker
//! - `display`: Placeholder-aware field formatting
//! - `export`: CSV, JSON and YAML snapshots
//! - `logging`: Tracing subscriber setup
//! - `tui`: The interactive viewer
//!
//! # Example
//!
//! ```rust,ignore
//! use snaptrack::config::{SnaptrackPaths, Settings};
//! use snaptrack::fetch::HttpSource;
//!
//! let paths = SnaptrackPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let url = settings.resolve_endpoint(None)?;
//! snaptrack::tui::run_tui(&settings, HttpSource::new(url, settings.request_timeout()))?;
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod tui;

pub use error::{ViewerError, ViewerResult};
