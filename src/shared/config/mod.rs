//! Application configuration module
//!
//! Provides configuration types for the client.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Backend server URL
    pub server_url: Option<String>,
    /// How often the trip monitor polls the backend, in seconds
    pub poll_interval_secs: Option<u64>,
    /// Seconds a pending trip request waits before auto-cancel
    pub search_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        let config: AppConfig = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.server_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        if self.poll_interval_secs == Some(0) {
            return Err(ConfigError::MissingValue("poll_interval_secs"));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    poll_interval_secs: Option<u64>,
    search_timeout_secs: Option<u64>,
}

impl AppConfigBuilder {
    /// Set the server URL
    pub fn server_url(mut self, url: String) -> Self {
        self.server_url = Some(url);
        self
    }

    /// Set the trip poll interval in seconds
    pub fn poll_interval_secs(mut self, secs: u64) -> Self {
        self.poll_interval_secs = Some(secs);
        self
    }

    /// Set the search auto-cancel timeout in seconds
    pub fn search_timeout_secs(mut self, secs: u64) -> Self {
        self.search_timeout_secs = Some(secs);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            server_url: self.server_url,
            poll_interval_secs: self.poll_interval_secs,
            search_timeout_secs: self.search_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("could not read {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = AppConfig::builder().build().unwrap();
        assert!(config.server_url.is_none());
        assert!(config.poll_interval_secs.is_none());
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let result = AppConfig::builder()
            .server_url("ftp://example.com".to_string())
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_builder_rejects_zero_interval() {
        let result = AppConfig::builder().poll_interval_secs(0).build();
        assert!(matches!(result, Err(ConfigError::MissingValue(_))));
    }

    #[test]
    fn test_from_file_parses_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("onride.toml");
        std::fs::write(
            &path,
            "server_url = \"http://127.0.0.1:3000\"\npoll_interval_secs = 7\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.server_url.as_deref(), Some("http://127.0.0.1:3000"));
        assert_eq!(config.poll_interval_secs, Some(7));
    }

    #[test]
    fn test_from_file_rejects_bad_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("onride.toml");
        std::fs::write(&path, "server_url = \"ftp://example.com\"\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
