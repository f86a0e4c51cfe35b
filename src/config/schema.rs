use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

pub const DEFAULT_METADATA_URL: &str = "http://169.254.169.254/latest/meta-data/public-ipv4";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DashboardConfig {
    /// Base URL of the game server exposing the metrics endpoint
    #[serde(default = "default_server_url")]
    #[validate(url)]
    pub server_url: String,

    #[serde(default = "default_metrics_path")]
    #[validate(length(min = 1))]
    pub metrics_path: String,

    /// Link-local instance metadata endpoint returning the public IPv4 address
    #[serde(default = "default_metadata_url")]
    #[validate(url)]
    pub metadata_url: String,

    #[serde(default = "default_refresh_interval")]
    #[validate(range(min = 100))]
    pub refresh_interval_ms: u64,

    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1))]
    pub request_timeout_ms: u64,

    #[serde(default = "default_metadata_timeout")]
    #[validate(range(min = 1))]
    pub metadata_timeout_ms: u64,

    #[serde(default = "default_max_players")]
    pub default_max_players: u64,

    /// chrono format string for the last-update time
    #[serde(default = "default_time_format")]
    #[validate(length(min = 1))]
    pub time_format: String,

    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputConfig {
    Console,
    Json {
        path: String,
    },
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_millis(self.metadata_timeout_ms)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            metrics_path: default_metrics_path(),
            metadata_url: default_metadata_url(),
            refresh_interval_ms: default_refresh_interval(),
            request_timeout_ms: default_request_timeout(),
            metadata_timeout_ms: default_metadata_timeout(),
            default_max_players: default_max_players(),
            time_format: default_time_format(),
            output: None,
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_metadata_url() -> String {
    DEFAULT_METADATA_URL.to_string()
}

fn default_refresh_interval() -> u64 {
    30_000
}

fn default_request_timeout() -> u64 {
    10_000
}

fn default_metadata_timeout() -> u64 {
    2_000
}

fn default_max_players() -> u64 {
    16
}

fn default_time_format() -> String {
    "%-I:%M:%S %p".to_string()
}
