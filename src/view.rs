//! Pure mapping from a metrics snapshot to what each display region shows.

use crate::metrics::MetricsSnapshot;
use serde::{Deserialize, Serialize};

const WARNING_THRESHOLD: f64 = 70.0;
const DANGER_THRESHOLD: f64 = 90.0;

/// Rounds half-up, so `-0.5` becomes `0` rather than `-1`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Normal,
    Warning,
    Danger,
}

impl Tier {
    /// Thresholds are exclusive: exactly 70 is normal, exactly 90 is warning.
    pub fn from_percent(percent: f64) -> Self {
        if percent > DANGER_THRESHOLD {
            Tier::Danger
        } else if percent > WARNING_THRESHOLD {
            Tier::Warning
        } else {
            Tier::Normal
        }
    }

    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Tier::Normal => None,
            Tier::Warning => Some("progress-warning"),
            Tier::Danger => Some("progress-danger"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gauge {
    /// Rounded percentage as reported, not clamped.
    pub percent: i64,
    /// Share of the track to fill, clamped to 0..=100.
    pub fill_width: u8,
    pub tier: Tier,
}

impl Gauge {
    pub fn from_percent(raw: f64) -> Self {
        let percent = round_half_up(raw);
        Self {
            percent,
            fill_width: percent.clamp(0, 100) as u8,
            tier: Tier::from_percent(raw),
        }
    }

    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Online,
    #[default]
    Offline,
}

impl ServerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ServerStatus::Online => "● ONLINE",
            ServerStatus::Offline => "● OFFLINE",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ServerStatus::Online => "status-online",
            ServerStatus::Offline => "status-offline",
        }
    }
}

pub fn memory_details(used_mb: f64, total_mb: f64) -> String {
    format!("{} MB / {} MB", round_half_up(used_mb), round_half_up(total_mb))
}

pub fn player_count(count: u64, max: u64) -> String {
    format!("{} / {}", count, max)
}

/// Everything one successful cycle writes to the display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub cpu: Gauge,
    pub memory: Gauge,
    pub memory_details: String,
    pub player_count: String,
    pub status: ServerStatus,
    pub uptime: String,
    pub last_update: String,
}

impl DashboardView {
    pub fn build(
        snapshot: &MetricsSnapshot,
        default_max_players: u64,
        uptime: String,
        last_update: String,
    ) -> Self {
        let status = if snapshot.is_running() {
            ServerStatus::Online
        } else {
            ServerStatus::Offline
        };

        Self {
            cpu: Gauge::from_percent(snapshot.cpu_percent()),
            memory: Gauge::from_percent(snapshot.memory_percent()),
            memory_details: memory_details(snapshot.memory_used_mb(), snapshot.memory_total_mb()),
            player_count: player_count(
                snapshot.player_count(),
                snapshot.max_players_or(default_max_players),
            ),
            status,
            uptime,
            last_update,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_rounded_integer_with_suffix() {
        for raw in [0.0, 0.4, 0.5, 33.3, 49.5, 70.0, 99.4, 100.0] {
            let gauge = Gauge::from_percent(raw);
            assert_eq!(gauge.label(), format!("{}%", (raw + 0.5_f64).floor() as i64));
        }
        assert_eq!(Gauge::from_percent(42.6).label(), "43%");
    }

    #[test]
    fn tier_boundaries_fall_to_lower_tier() {
        assert_eq!(Tier::from_percent(70.0), Tier::Normal);
        assert_eq!(Tier::from_percent(70.1), Tier::Warning);
        assert_eq!(Tier::from_percent(90.0), Tier::Warning);
        assert_eq!(Tier::from_percent(90.1), Tier::Danger);
        assert_eq!(Tier::from_percent(0.0).css_class(), None);
        assert_eq!(Tier::from_percent(95.0).css_class(), Some("progress-danger"));
    }

    #[test]
    fn fill_width_is_clamped_but_label_is_not() {
        let over = Gauge::from_percent(150.2);
        assert_eq!(over.label(), "150%");
        assert_eq!(over.fill_width, 100);
        assert_eq!(over.tier, Tier::Danger);

        let under = Gauge::from_percent(-5.0);
        assert_eq!(under.label(), "-5%");
        assert_eq!(under.fill_width, 0);
        assert_eq!(under.tier, Tier::Normal);
    }

    #[test]
    fn memory_and_player_text() {
        assert_eq!(memory_details(2047.6, 8192.0), "2048 MB / 8192 MB");
        assert_eq!(player_count(3, 16), "3 / 16");
    }

    #[test]
    fn view_from_sparse_snapshot() {
        let snapshot = MetricsSnapshot {
            cpu_percent: Some(71.2),
            ..MetricsSnapshot::default()
        };
        let view = DashboardView::build(&snapshot, 16, "5m".into(), "1:02:03 PM".into());

        assert_eq!(view.cpu.label(), "71%");
        assert_eq!(view.cpu.tier, Tier::Warning);
        assert_eq!(view.memory.label(), "0%");
        assert_eq!(view.memory_details, "0 MB / 0 MB");
        assert_eq!(view.player_count, "0 / 16");
        assert_eq!(view.status, ServerStatus::Offline);
        assert_eq!(view.uptime, "5m");
    }
}
