//! Process configuration and credential loading.
//!
//! The API key is loaded once at startup from a credential file. A missing,
//! unreadable, or empty key file is an error the entry point turns into a
//! refusal to start; nothing in the polling path ever re-reads it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Default API key file path.
const DEFAULT_KEY_FILE: &str = "key.txt";

/// Default persisted settings file path.
const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Default quote provider base URL.
const DEFAULT_API_URL: &str = "https://www.alphavantage.co";

/// Default HTTP request timeout.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Quote provider API key.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    /// Wrap a non-empty API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        Ok(Self { api_key })
    }

    /// Read the key file, trimming surrounding whitespace.
    pub fn from_key_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::KeyFileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(raw.trim())
    }

    /// Get the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Process configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path of the API key file.
    pub key_file: PathBuf,
    /// Path of the persisted settings file.
    pub settings_file: PathBuf,
    /// Quote provider base URL.
    pub api_base_url: String,
    /// HTTP request timeout.
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            key_file: PathBuf::from(DEFAULT_KEY_FILE),
            settings_file: PathBuf::from(DEFAULT_SETTINGS_FILE),
            api_base_url: DEFAULT_API_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Create configuration from environment variables, falling back to
    /// defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            key_file: parse_env_path("STOCKBAR_KEY_FILE", defaults.key_file),
            settings_file: parse_env_path("STOCKBAR_SETTINGS_FILE", defaults.settings_file),
            api_base_url: std::env::var("STOCKBAR_API_URL").unwrap_or(defaults.api_base_url),
            http_timeout: parse_env_duration_secs("STOCKBAR_HTTP_TIMEOUT_SECS", defaults.http_timeout),
        }
    }
}

/// Configuration and credential errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// API key file could not be read.
    #[error("unable to read key file {}: {source}", .path.display())]
    KeyFileUnreadable {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// API key is empty.
    #[error("API key is empty")]
    EmptyKey,
}

fn parse_env_path(key: &str, default: PathBuf) -> PathBuf {
    std::env::var(key).map_or(default, PathBuf::from)
}

fn parse_env_duration_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_secs)
}
