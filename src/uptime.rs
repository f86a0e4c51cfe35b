//! Client-side uptime: wall-clock time since this dashboard process started.

use std::time::{Duration, Instant};

/// Formats an elapsed duration using its coarsest unit. All parts are floored.
pub fn format_uptime(elapsed_ms: u64) -> String {
    let seconds = elapsed_ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", seconds)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UptimeClock {
    started: Instant,
}

impl UptimeClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    pub fn formatted(&self) -> String {
        format_uptime(self.elapsed_ms())
    }
}

impl Default for UptimeClock {
    fn default() -> Self {
        Self::start()
    }
}
