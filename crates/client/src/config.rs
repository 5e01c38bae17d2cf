//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `USERHUB_API_BASE` - Base URL of the profile service
//!   (e.g., `https://profiles.example.com`)
//!
//! ## Optional
//! - `USERHUB_SESSION_FILE` - Path of the session cache file
//!   (default: `$HOME/.userhub/session.json`, falling back to
//!   `.userhub-session.json` in the working directory)
//! - `USERHUB_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const SESSION_DIR: &str = ".userhub";
const SESSION_FILE: &str = "session.json";
const SESSION_FILE_FALLBACK: &str = ".userhub-session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    /// An environment variable is set but cannot be parsed.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the profile service.
    pub api_base: Url,
    /// Path of the session cache file.
    pub session_file: PathBuf,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `USERHUB_API_BASE` is missing or not a
    /// valid URL, or if `USERHUB_TIMEOUT_SECS` is set but not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base = get_required_env("USERHUB_API_BASE")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("USERHUB_API_BASE".to_string(), e.to_string())
            })?;

        let session_file = get_optional_env("USERHUB_SESSION_FILE")
            .map_or_else(default_session_file, PathBuf::from);

        let timeout_secs = match get_optional_env("USERHUB_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("USERHUB_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base,
            session_file,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a configuration directly, for embedders and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `api_base` is not a valid URL.
    pub fn new(api_base: &str, session_file: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let api_base = api_base.parse::<Url>().map_err(|e| {
            ConfigError::InvalidEnvVar("USERHUB_API_BASE".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base,
            session_file: session_file.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Default session file path: `$HOME/.userhub/session.json`, or a
/// dotfile in the working directory when `HOME` is unset.
fn default_session_file() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(SESSION_FILE_FALLBACK),
        |home| PathBuf::from(home).join(SESSION_DIR).join(SESSION_FILE),
    )
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_parses_base_url() {
        let config = ClientConfig::new("http://localhost:8080", "/tmp/session.json").unwrap();
        assert_eq!(config.api_base.as_str(), "http://localhost:8080/");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = ClientConfig::new("not a url", "/tmp/session.json");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_default_session_file_shape() {
        let path = default_session_file();
        let s = path.to_string_lossy();
        assert!(s.ends_with("session.json") || s.ends_with(SESSION_FILE_FALLBACK));
    }
}
