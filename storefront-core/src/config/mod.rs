use serde::Deserialize;
use std::time::Duration;

/// Connection settings for the storefront backend.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    /// Base URL of the REST API, without a trailing slash.
    pub url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_refresh_path() -> String {
    "/auth/refresh-token".to_string()
}

impl BackendSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_ms: default_timeout_ms(),
            refresh_path: default_refresh_path(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector; spans are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}
