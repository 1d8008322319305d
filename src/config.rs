//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Complete client settings.
///
/// Everything comes from the environment (optionally via a `.env` file); there
/// is no configuration file. Every field has a working default so a fresh
/// checkout talks to a local backend with zero setup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the DataSync backend
    pub base_url: Url,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Where the bearer token is persisted between invocations
    pub token_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_path: default_token_path(),
        }
    }
}

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let base_url = match std::env::var("DATASYNC_API_URL") {
            Ok(raw) => parse_base_url(&raw)?,
            Err(_) => Settings::default().base_url,
        };

        let request_timeout = std::env::var("DATASYNC_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Settings::default().request_timeout);

        let token_path = std::env::var("DATASYNC_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_token_path());

        Ok(Self {
            base_url,
            request_timeout,
            token_path,
        })
    }
}

/// Parse and validate the backend base URL.
///
/// Rejects URLs that cannot carry path segments (`mailto:` and friends), since
/// every endpoint is built by appending segments to this value.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidValue(format!("Invalid DATASYNC_API_URL: {}", e)))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue(format!(
            "DATASYNC_API_URL must be an http(s) URL, got '{}'",
            raw
        )));
    }

    Ok(url)
}

fn default_token_path() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".datasync").join("token"),
        Err(_) => PathBuf::from(".datasync-token"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_parse_base_url() {
        let url = parse_base_url("https://sync.example.com:8443").unwrap();
        assert_eq!(url.host_str(), Some("sync.example.com"));
        assert_eq!(url.port(), Some(8443));
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("mailto:ops@example.com").is_err());
    }
}
