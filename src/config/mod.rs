//! Configuration module for SnapTrack
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence (endpoint, presentation preferences)

pub mod paths;
pub mod settings;

pub use paths::SnaptrackPaths;
pub use settings::Settings;
