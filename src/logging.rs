//! Tracing setup
//!
//! The TUI owns the terminal while it runs, so interactive sessions log to a
//! file; the one-shot commands log to stderr.
//!
//! Usage:
//!   snaptrack --debug ...               # Debug level
//!   RUST_LOG=snaptrack=trace snaptrack  # Fine-grained log control

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Where log lines go
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Enable debug logging (unless RUST_LOG is explicitly set)
    pub debug: bool,
    pub target: LogTarget,
}

fn env_filter(debug: bool) -> EnvFilter {
    let default_level = if debug { "snaptrack=debug" } else { "snaptrack=info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize the global subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config.debug))
        .with_target(config.debug);

    match &config.target {
        LogTarget::Stderr => builder
            .compact()
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err)),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!(err))
        }
    }
}
