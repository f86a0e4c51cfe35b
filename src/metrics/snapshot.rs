use serde::{Deserialize, Serialize};

/// One payload from the metrics endpoint. Every field is optional on the
/// wire; `null` is treated the same as an absent field. Counts are read as
/// plain JSON numbers so `4.0` is accepted as well as `4`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(default)]
    pub cpu_percent: Option<f64>,
    #[serde(default)]
    pub memory_percent: Option<f64>,
    #[serde(default)]
    pub memory_used_mb: Option<f64>,
    #[serde(default)]
    pub memory_total_mb: Option<f64>,
    #[serde(default)]
    pub player_count: Option<f64>,
    #[serde(default)]
    pub max_players: Option<f64>,
    #[serde(default)]
    pub server_status: Option<String>,
}

impl MetricsSnapshot {
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    pub fn cpu_percent(&self) -> f64 {
        self.cpu_percent.unwrap_or(0.0)
    }

    pub fn memory_percent(&self) -> f64 {
        self.memory_percent.unwrap_or(0.0)
    }

    pub fn memory_used_mb(&self) -> f64 {
        self.memory_used_mb.unwrap_or(0.0)
    }

    pub fn memory_total_mb(&self) -> f64 {
        self.memory_total_mb.unwrap_or(0.0)
    }

    /// Integer part of the reported count; negative values read as 0.
    pub fn player_count(&self) -> u64 {
        self.player_count.map(|count| count.max(0.0) as u64).unwrap_or(0)
    }

    /// A reported capacity of zero is treated as missing.
    pub fn max_players_or(&self, default: u64) -> u64 {
        self.max_players
            .map(|max| max.max(0.0) as u64)
            .filter(|&max| max > 0)
            .unwrap_or(default)
    }

    pub fn is_running(&self) -> bool {
        self.server_status.as_deref() == Some("running")
    }
}
