/// Runtime configuration for the attendance form service
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration, loaded from a JSON file.
///
/// Every field has a default, so a partial file (or none at all) is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the attendance API, without a trailing slash
    pub api_base_url: String,
    /// Address the form service binds to
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Attempts for idempotent reads (course fetch); create calls are never retried
    pub max_fetch_attempts: u32,
    pub retry_base_delay_ms: u64,
    /// Official attendance window used when the recurring form leaves it blank
    pub default_official_minutes: u32,
    /// One of "trace", "debug", "info", "warn", "error"
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_fetch_attempts: 3,
            retry_base_delay_ms: 250,
            default_official_minutes: 15,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to the JSON config file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` - Loaded configuration, missing fields defaulted
    /// * `Err` - If the file can't be read or parsed
    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let mut config: AppConfig = serde_json::from_str(&content)?;
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Address string for the listener, e.g. "127.0.0.1:8080"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    /// Parsed log level, falling back to INFO on unknown values
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level
            .parse::<tracing::Level>()
            .unwrap_or(tracing::Level::INFO)
    }
}
