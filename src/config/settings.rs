//! User settings for SnapTrack
//!
//! Persists the expenses endpoint and a handful of presentation preferences.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::SnaptrackPaths;
use crate::error::ViewerError;

/// User settings for SnapTrack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// URL of the expenses collection endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Timeout for the single retrieval call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How often the TUI wakes up to animate
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Length of the row enter/exit transition
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    /// Currency marker prefixed to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Capture the mouse so rows and the detail backdrop are clickable
    #[serde(default = "default_mouse_enabled")]
    pub mouse_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_tick_rate_ms() -> u64 {
    50
}

fn default_transition_ms() -> u64 {
    300
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_mouse_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            endpoint: None,
            request_timeout_secs: default_request_timeout_secs(),
            tick_rate_ms: default_tick_rate_ms(),
            transition_ms: default_transition_ms(),
            currency_symbol: default_currency(),
            mouse_enabled: default_mouse_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &SnaptrackPaths) -> Result<Self, ViewerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ViewerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ViewerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SnaptrackPaths) -> Result<(), ViewerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ViewerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ViewerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Set the endpoint after checking it is an absolute http(s) URL
    pub fn set_endpoint(&mut self, url: &str) -> Result<(), ViewerError> {
        self.endpoint = Some(validate_endpoint(url)?);
        Ok(())
    }

    /// Resolve the endpoint to use, preferring an explicit override
    pub fn resolve_endpoint(&self, override_url: Option<&str>) -> Result<String, ViewerError> {
        match override_url.or(self.endpoint.as_deref()) {
            Some(url) => validate_endpoint(url),
            None => Err(ViewerError::missing_endpoint()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

fn validate_endpoint(url: &str) -> Result<String, ViewerError> {
    let parsed = reqwest::Url::parse(url.trim())
        .map_err(|e| ViewerError::Config(format!("Invalid endpoint URL '{}': {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed.to_string()),
        other => Err(ViewerError::Config(format!(
            "Unsupported endpoint scheme '{}' (expected http or https)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.endpoint, None);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.request_timeout(), Duration::from_secs(15));
        assert_eq!(settings.transition_duration(), Duration::from_millis(300));
        assert!(settings.mouse_enabled);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SnaptrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings
            .set_endpoint("https://api.example.test/prod/expenses")
            .unwrap();
        settings.currency_symbol = "€".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(
            loaded.endpoint.as_deref(),
            Some("https://api.example.test/prod/expenses")
        );
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"endpoint": "http://localhost:8080/expenses"}"#).unwrap();
        assert_eq!(settings.tick_rate_ms, 50);
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_resolve_endpoint_prefers_override() {
        let mut settings = Settings::default();
        settings.set_endpoint("https://stored.test/expenses").unwrap();

        let resolved = settings
            .resolve_endpoint(Some("http://override.test/expenses"))
            .unwrap();
        assert_eq!(resolved, "http://override.test/expenses");

        let stored = settings.resolve_endpoint(None).unwrap();
        assert_eq!(stored, "https://stored.test/expenses");
    }

    #[test]
    fn test_resolve_endpoint_without_configuration() {
        let err = Settings::default().resolve_endpoint(None).unwrap_err();
        assert!(matches!(err, ViewerError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_endpoints() {
        let mut settings = Settings::default();
        assert!(settings.set_endpoint("not a url").is_err());
        assert!(settings.set_endpoint("ftp://files.test/expenses").is_err());
        assert_eq!(settings.endpoint, None);
    }
}
