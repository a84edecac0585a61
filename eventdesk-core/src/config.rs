//! eventdesk configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

static DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
static DEFAULT_CURRENCY: &str = "$";

/// Environment variable that overrides `api_url` from the config file.
pub const API_URL_ENV: &str = "EVENTDESK_API_URL";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Configuration at ~/.config/eventdesk/config.toml
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeskConfig {
    /// Base URL of the events backend (without `/api/events`).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Symbol printed in front of prices.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        DeskConfig {
            api_url: default_api_url(),
            request_timeout_secs: default_timeout_secs(),
            currency: default_currency(),
        }
    }
}

impl DeskConfig {
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("eventdesk");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file (if any), then apply the environment override.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        let contents = format!(
            "\
# eventdesk configuration

# Events backend (requests go to <api_url>/api/events):
# api_url = \"{DEFAULT_API_URL}\"

# Seconds to wait for the backend before giving up:
# request_timeout_secs = {DEFAULT_TIMEOUT_SECS}

# Currency symbol shown next to prices:
# currency = \"{DEFAULT_CURRENCY}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = DeskConfig::parse("").unwrap();
        assert_eq!(config, DeskConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_config() {
        let config = DeskConfig::parse("api_url = \"https://events.example.com\"").unwrap();
        assert_eq!(config.api_url, "https://events.example.com");
        assert_eq!(config.currency, "$");
    }

    #[test]
    fn test_invalid_config() {
        let err = DeskConfig::parse("request_timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_default_config_file_parses_to_defaults() {
        let path = std::env::temp_dir()
            .join(format!("eventdesk-config-test-{}", std::process::id()))
            .join("config.toml");

        DeskConfig::create_default_config(&path).unwrap();
        let config = DeskConfig::load_from(&path).unwrap();
        assert_eq!(config, DeskConfig::default());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("eventdesk-does-not-exist/config.toml");
        assert_eq!(DeskConfig::load_from(&path).unwrap(), DeskConfig::default());
    }
}
