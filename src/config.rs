//! Application configuration.
//!
//! Configuration is stored as YAML, by default in the platform config
//! directory (`~/.config/alertdesk/config.yaml` on Linux), and includes:
//! - Backend base URL and request timeout
//! - Page size and the number of page buttons shown
//! - Notification lifetime and failure reporting
//! - Default reprocessing window

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AlertDeskError, Result};
use crate::query::pagination::{DEFAULT_MAX_PAGE_BUTTONS, DEFAULT_PAGE_SIZE};
use crate::types::TimeWindow;

/// Environment variable overriding `base_url`
pub const URL_ENV_VAR: &str = "ALERTDESK_URL";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL (default: http://localhost:8083)
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Alerts per page (default: 10)
    pub page_size: usize,

    /// Page-number buttons shown at once (default: 10)
    pub max_page_buttons: usize,

    /// How long a notification stays visible, in milliseconds (default: 5000)
    pub notification_ttl_ms: u64,

    /// Window sent with process requests (default: 30d)
    pub process_window: TimeWindow,

    /// Also notify when an action fails (default: false)
    pub notify_failures: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8083".to_string(),
            timeout_secs: 30,
            page_size: DEFAULT_PAGE_SIZE,
            max_page_buttons: DEFAULT_MAX_PAGE_BUTTONS,
            notification_ttl_ms: 5000,
            process_window: TimeWindow::default(),
            notify_failures: false,
        }
    }
}

impl Config {
    /// Default location of the config file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "alertdesk").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file that was asked for explicitly is an error. Environment overrides
    /// are applied afterwards.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path)?,
                _ => Config::default(),
            },
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path).map_err(|e| {
            AlertDeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;

        // An empty file is a valid, all-defaults config
        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Write configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AlertDeskError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).map_err(|e| {
            AlertDeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var(URL_ENV_VAR)
            && !url.trim().is_empty()
        {
            self.base_url = url.trim().to_string();
        }
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(AlertDeskError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.max_page_buttons == 0 {
            return Err(AlertDeskError::Config(
                "max_page_buttons must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(AlertDeskError::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Override the base URL (the `--url` flag)
    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = url.into();
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;
    use crate::types::WindowUnit;

    struct EnvGuard {
        previous: Option<String>,
    }

    impl EnvGuard {
        fn set(value: Option<&str>) -> Self {
            let previous = env::var(URL_ENV_VAR).ok();
            // SAFETY: tests touching the environment are serialized
            unsafe {
                match value {
                    Some(v) => env::set_var(URL_ENV_VAR, v),
                    None => env::remove_var(URL_ENV_VAR),
                }
            }
            Self { previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: tests touching the environment are serialized
            unsafe {
                match &self.previous {
                    Some(v) => env::set_var(URL_ENV_VAR, v),
                    None => env::remove_var(URL_ENV_VAR),
                }
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8083");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.max_page_buttons, 10);
        assert_eq!(config.notification_ttl(), Duration::from_millis(5000));
        assert_eq!(config.process_window.to_string(), "30d");
        assert!(!config.notify_failures);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
page_size: 25
process_window: 12h
"#;
        let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.process_window.amount(), 12);
        assert_eq!(config.process_window.unit(), WindowUnit::Hours);
        assert_eq!(config.base_url, "http://localhost:8083");
        assert_eq!(config.notification_ttl_ms, 5000);
    }

    #[test]
    fn test_invalid_window_is_rejected() {
        let result: std::result::Result<Config, _> =
            serde_yaml_ng::from_str("process_window: 3w\n");
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_save_and_load_roundtrip() {
        let _env = EnvGuard::set(None);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.set_base_url("http://alerts.internal:9000");
        config.notify_failures = true;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "base_url: http://from-file:1\n").unwrap();

        let _env = EnvGuard::set(Some("http://from-env:2"));
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.base_url, "http://from-env:2");
    }

    #[test]
    #[serial]
    fn test_empty_file_is_default() {
        let _env = EnvGuard::set(None);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "\n").unwrap();

        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.yaml")));
        assert!(matches!(result, Err(AlertDeskError::Io(_))));
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AlertDeskError::Config(_))));
    }
}
