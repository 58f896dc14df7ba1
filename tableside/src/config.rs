//! Application configuration

use std::path::PathBuf;

/// Runtime configuration, loaded from the environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | `TABLY_API_URL` | `http://localhost:5000` | Ordering backend base URL |
/// | `TABLY_DATA_DIR` | `.tably` | Session file and log directory |
/// | `TABLY_HTTP_TIMEOUT_SECS` | `30` | Request timeout in seconds |
#[derive(Debug, Clone)]
pub struct Config {
    /// Ordering backend base URL
    pub api_url: String,
    /// Directory holding the session file and logs
    pub data_dir: PathBuf,
    /// Request timeout in seconds
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("TABLY_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            data_dir: std::env::var("TABLY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".tably")),
            http_timeout_secs: std::env::var("TABLY_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Override endpoint and data directory, for tests
    pub fn with_overrides(api_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::from_env();
        config.api_url = api_url.into();
        config.data_dir = data_dir.into();
        config
    }

    /// Directory for rolling log files
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    /// Client configuration for the ordering backend
    pub fn client_config(&self) -> tably_client::ClientConfig {
        tably_client::ClientConfig::new(self.api_url.clone()).with_timeout(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
