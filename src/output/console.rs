use super::Renderer;
use crate::view::{Gauge, ServerStatus, Tier};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;

const GAUGE_TEMPLATE: &str = "{prefix:>10} [{bar:40.COLOR/white}] {msg}";
const LINE_TEMPLATE: &str = "{prefix:>10} {msg}";

/// Terminal surface. Gauges are progress bars coloured by tier; the other
/// regions are single message lines.
pub struct ConsoleOutput {
    multi: Arc<MultiProgress>,
    loading: ProgressBar,
    error: ProgressBar,
    address: ProgressBar,
    status: ProgressBar,
    cpu: ProgressBar,
    memory: ProgressBar,
    memory_details: ProgressBar,
    players: ProgressBar,
    uptime: ProgressBar,
    last_update: ProgressBar,
    address_attached: bool,
    dashboard_attached: bool,
    error_attached: bool,
}

impl ConsoleOutput {
    pub fn new(multi: Option<Arc<MultiProgress>>) -> Self {
        let multi = multi.unwrap_or_else(|| Arc::new(MultiProgress::new()));

        let loading = multi.add(line("", "Loading metrics..."));

        Self {
            loading,
            error: line("error", ""),
            address: line("server", ""),
            status: line("status", ""),
            cpu: gauge("cpu"),
            memory: gauge("memory"),
            memory_details: line("", ""),
            players: line("players", ""),
            uptime: line("uptime", ""),
            last_update: line("updated", ""),
            multi,
            address_attached: false,
            dashboard_attached: false,
            error_attached: false,
        }
    }

    fn update_gauge(bar: &ProgressBar, value: &Gauge) {
        bar.set_style(gauge_style(value.tier));
        bar.set_position(value.fill_width as u64);
        bar.set_message(value.label());
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(None)
    }
}

fn line(prefix: &'static str, message: &'static str) -> ProgressBar {
    let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
    bar.set_style(
        ProgressStyle::with_template(LINE_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_prefix(prefix);
    bar.set_message(message);
    bar
}

fn gauge(prefix: &'static str) -> ProgressBar {
    let bar = ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::hidden());
    bar.set_style(gauge_style(Tier::Normal));
    bar.set_prefix(prefix);
    bar
}

fn gauge_style(tier: Tier) -> ProgressStyle {
    let color = match tier {
        Tier::Normal => "green",
        Tier::Warning => "yellow",
        Tier::Danger => "red",
    };
    ProgressStyle::with_template(&GAUGE_TEMPLATE.replace("COLOR", color))
        .map(|style| style.progress_chars("█▓░"))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

impl Renderer for ConsoleOutput {
    fn set_loading_visible(&mut self, visible: bool) {
        if visible {
            self.loading.set_message("Loading metrics...");
        } else {
            self.loading.set_message("");
        }
    }

    fn set_dashboard_visible(&mut self, visible: bool) {
        if visible && !self.dashboard_attached {
            for bar in [
                &self.status,
                &self.cpu,
                &self.memory,
                &self.memory_details,
                &self.players,
                &self.uptime,
                &self.last_update,
            ] {
                self.multi.add(bar.clone());
            }
            self.dashboard_attached = true;
        }
    }

    fn show_error(&mut self, message: &str) {
        if !self.error_attached {
            self.multi.insert(0, self.error.clone());
            self.error_attached = true;
        }
        self.error.set_message(format!("⚠ {}", message));
    }

    fn hide_error(&mut self) {
        self.error.set_message("");
        if self.error_attached {
            self.multi.remove(&self.error);
            self.error_attached = false;
        }
    }

    fn set_cpu_gauge(&mut self, gauge: &Gauge) {
        Self::update_gauge(&self.cpu, gauge);
    }

    fn set_memory_gauge(&mut self, gauge: &Gauge) {
        Self::update_gauge(&self.memory, gauge);
    }

    fn set_memory_details(&mut self, text: &str) {
        self.memory_details.set_message(text.to_string());
    }

    fn set_player_count(&mut self, text: &str) {
        self.players.set_message(text.to_string());
    }

    fn set_server_status(&mut self, status: ServerStatus) {
        let color = match status {
            ServerStatus::Online => "green",
            ServerStatus::Offline => "red",
        };
        if let Ok(style) = ProgressStyle::with_template(&format!("{{prefix:>10}} {{msg:.{}.bold}}", color)) {
            self.status.set_style(style);
        }
        self.status.set_message(status.label());
    }

    fn set_uptime(&mut self, text: &str) {
        self.uptime.set_message(text.to_string());
    }

    fn set_last_update(&mut self, text: &str) {
        self.last_update.set_message(text.to_string());
    }

    fn set_server_address(&mut self, text: &str) {
        // Resolved before the first fetch, so it is shown even while loading.
        if !self.address_attached {
            self.multi.insert_after(&self.loading, self.address.clone());
            self.address_attached = true;
        }
        self.address.set_message(text.to_string());
    }
}
