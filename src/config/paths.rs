//! Path management for SnapTrack
//!
//! ## Path Resolution Order
//!
//! 1. `SNAPTRACK_CONFIG_DIR` environment variable (if set)
//! 2. The platform configuration directory (`~/.config/snaptrack` on Linux,
//!    `~/Library/Application Support/snaptrack` on macOS, `%APPDATA%` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ViewerError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "SNAPTRACK_CONFIG_DIR";

/// Manages all paths used by SnapTrack
#[derive(Debug, Clone)]
pub struct SnaptrackPaths {
    /// Base directory for settings and logs
    base_dir: PathBuf,
}

impl SnaptrackPaths {
    /// Create a new SnaptrackPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ViewerError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "snaptrack")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    ViewerError::Config("Could not determine a configuration directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create SnaptrackPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the log file used while the TUI owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("snaptrack.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ViewerError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            ViewerError::Io(format!("Failed to create config directory: {}", e))
        })
    }
}
