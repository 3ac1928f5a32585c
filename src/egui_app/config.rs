use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Default trip poll interval in seconds
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default search auto-cancel timeout in seconds
const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 300;

/// Application configuration wrapper.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
    token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        // A config file (ONRIDE_CONFIG) is the base; ONRIDE_API_URL wins
        // over whatever it says.
        let mut app = std::env::var("ONRIDE_CONFIG")
            .ok()
            .and_then(|path| AppConfig::from_file(path).ok())
            .unwrap_or_default();
        if let Ok(url) = std::env::var("ONRIDE_API_URL") {
            app.server_url = Some(url);
        } else if app.server_url.is_none() {
            app.server_url = Some(DEFAULT_SERVER_URL.to_string());
        }
        Self { app, token: None }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app, token: None })
    }

    /// Set the session token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the session token
    pub fn get_token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    /// Clear the token (logout)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// How often the trip monitor polls the backend
    pub fn poll_interval_secs(&self) -> u64 {
        self.app
            .poll_interval_secs
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
    }

    /// Seconds a pending request waits for a driver before auto-cancel
    pub fn search_timeout_secs(&self) -> u64 {
        self.app
            .search_timeout_secs
            .unwrap_or(DEFAULT_SEARCH_TIMEOUT_SECS)
    }
}
