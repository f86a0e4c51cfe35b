use crate::config::DashboardConfig;
use crate::error::{Error, Result};
use crate::metrics::{PollCollector, PollStats};
use crate::output::Renderer;
use crate::source::MetricsSource;
use crate::uptime::UptimeClock;
use crate::view::DashboardView;
use chrono::Local;
use std::fmt::Write;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;

const FALLBACK_TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardState {
    /// No cycle has succeeded yet.
    Loading,
    /// The last cycle succeeded.
    Live,
    /// The last cycle failed; the last good values are still on display.
    Stale,
}

/// The poller-renderer: owns the display, the uptime clock and the poll loop.
pub struct Dashboard<R: Renderer> {
    source: Arc<dyn MetricsSource>,
    renderer: R,
    uptime: UptimeClock,
    refresh_interval: Duration,
    default_max_players: u64,
    time_format: String,
    stats: PollCollector,
    state_watcher: watch::Sender<DashboardState>,
}

impl<R: Renderer> Dashboard<R> {
    pub fn new(source: Arc<dyn MetricsSource>, renderer: R, config: &DashboardConfig) -> Self {
        let (state_tx, _) = watch::channel(DashboardState::Loading);

        Self {
            source,
            renderer,
            uptime: UptimeClock::start(),
            refresh_interval: config.refresh_interval(),
            default_max_players: config.default_max_players,
            time_format: config.time_format.clone(),
            stats: PollCollector::new(),
            state_watcher: state_tx,
        }
    }

    /// Resolves the display address once; failures fall back silently.
    pub async fn resolve_address(&mut self) -> String {
        let address = match self.source.public_address().await {
            Ok(address) => address,
            Err(e) => {
                let fallback = self.source.fallback_address();
                log::debug!("Metadata lookup failed ({}), using {}", e, fallback);
                fallback
            }
        };
        self.renderer.set_server_address(&address);
        address
    }

    /// Fetches one snapshot and renders it. On failure nothing is rendered.
    pub async fn fetch_and_render(&mut self) -> Result<()> {
        let started = Instant::now();
        let snapshot = match self.source.fetch_metrics().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.stats.record_failure(&e, started.elapsed());
                return Err(e);
            }
        };
        self.stats.record_success(started.elapsed());

        let view = DashboardView::build(
            &snapshot,
            self.default_max_players,
            self.uptime.formatted(),
            self.local_time(),
        );
        self.render_view(&view);
        self.set_state(DashboardState::Live);

        log::debug!(
            "Rendered snapshot: cpu {} memory {} players {}",
            view.cpu.label(),
            view.memory.label(),
            view.player_count
        );
        Ok(())
    }

    /// One timer cycle: fetch and render, or surface the failure over the
    /// last good values. Never fatal.
    pub async fn poll_cycle(&mut self) -> Result<()> {
        let outcome = self.fetch_and_render().await;
        if let Err(e) = &outcome {
            log::error!("Error fetching metrics: {}", e);
            self.render_error(e);
        }

        if let Err(e) = self.renderer.flush() {
            log::warn!("Failed to flush display: {}", e);
        }
        outcome
    }

    /// Runs until Ctrl-C.
    pub async fn run(&mut self) {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;
    }

    /// Resolves the address, then polls immediately and on every interval
    /// until `shutdown` completes.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let address = self.resolve_address().await;
        log::info!(
            "Watching {} every {}s",
            address,
            self.refresh_interval.as_secs_f64()
        );

        tokio::select! {
            _ = shutdown => {
                log::info!("Shutting down...");
            }
            _ = self.poll_forever() => {}
        }

        let stats = self.stats();
        log::info!(
            "Polled {} times: {} ok, {} failed ({:.1}% success, avg {}ms)",
            stats.cycles,
            stats.successes,
            stats.failures(),
            stats.success_rate,
            stats.avg_fetch_time_ms
        );
    }

    async fn poll_forever(&mut self) {
        let mut interval = tokio::time::interval(self.refresh_interval);
        // Cycles never overlap; ticks missed during a slow fetch are dropped.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut ticks = IntervalStream::new(interval);
        while ticks.next().await.is_some() {
            let _ = self.poll_cycle().await;
        }
    }

    fn render_view(&mut self, view: &DashboardView) {
        self.renderer.set_loading_visible(false);
        self.renderer.set_dashboard_visible(true);
        self.renderer.hide_error();

        self.renderer.set_cpu_gauge(&view.cpu);
        self.renderer.set_memory_gauge(&view.memory);
        self.renderer.set_memory_details(&view.memory_details);
        self.renderer.set_player_count(&view.player_count);
        self.renderer.set_server_status(view.status);
        self.renderer.set_uptime(&view.uptime);
        self.renderer.set_last_update(&view.last_update);
    }

    fn render_error(&mut self, error: &Error) {
        self.renderer
            .show_error(&format!("Failed to fetch metrics: {}", error));
        self.renderer.set_loading_visible(false);

        if self.state() == DashboardState::Live {
            self.set_state(DashboardState::Stale);
        }
    }

    fn local_time(&self) -> String {
        let now = Local::now();
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.time_format)).is_err() {
            out.clear();
            let _ = write!(out, "{}", now.format(FALLBACK_TIME_FORMAT));
        }
        out
    }

    fn set_state(&self, state: DashboardState) {
        self.state_watcher.send_replace(state);
    }

    pub fn state(&self) -> DashboardState {
        *self.state_watcher.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<DashboardState> {
        self.state_watcher.subscribe()
    }

    pub fn stats(&self) -> PollStats {
        self.stats.snapshot()
    }

    pub fn uptime(&self) -> &UptimeClock {
        &self.uptime
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsSnapshot;
    use crate::output::DisplayState;
    use crate::view::{ServerStatus, Tier};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed script of fetch outcomes.
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<MetricsSnapshot>>>,
        address: Option<String>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<MetricsSnapshot>>, address: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                address: address.map(str::to_string),
            })
        }
    }

    #[async_trait]
    impl MetricsSource for ScriptedSource {
        async fn fetch_metrics(&self) -> Result<MetricsSnapshot> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::Internal("script exhausted".into())))
        }

        async fn public_address(&self) -> Result<String> {
            self.address
                .clone()
                .ok_or_else(|| Error::Internal("no metadata".into()))
        }

        fn fallback_address(&self) -> String {
            "localhost".to_string()
        }
    }

    fn healthy() -> MetricsSnapshot {
        MetricsSnapshot {
            cpu_percent: Some(45.4),
            memory_percent: Some(91.0),
            memory_used_mb: Some(7450.2),
            memory_total_mb: Some(8192.0),
            player_count: Some(4.0),
            max_players: Some(32.0),
            server_status: Some("running".into()),
        }
    }

    fn dashboard(source: Arc<ScriptedSource>) -> Dashboard<DisplayState> {
        Dashboard::new(source, DisplayState::new(), &DashboardConfig::default())
    }

    #[tokio::test]
    async fn success_populates_every_region() {
        let mut dash = dashboard(ScriptedSource::new(vec![Ok(healthy())], None));
        assert_eq!(dash.state(), DashboardState::Loading);

        dash.poll_cycle().await.unwrap();

        let display = dash.renderer();
        assert!(!display.loading_visible);
        assert!(display.dashboard_visible);
        assert_eq!(display.error, None);
        assert_eq!(display.cpu.unwrap().label(), "45%");
        assert_eq!(display.cpu.unwrap().tier, Tier::Normal);
        assert_eq!(display.memory.unwrap().tier, Tier::Danger);
        assert_eq!(display.memory_details.as_deref(), Some("7450 MB / 8192 MB"));
        assert_eq!(display.player_count.as_deref(), Some("4 / 32"));
        assert_eq!(display.server_status, Some(ServerStatus::Online));
        assert_eq!(display.uptime.as_deref(), Some("0s"));
        assert!(display.last_update.is_some());
        assert_eq!(dash.state(), DashboardState::Live);
    }

    #[tokio::test]
    async fn failure_keeps_last_good_values() {
        let mut dash = dashboard(ScriptedSource::new(
            vec![Ok(healthy()), Err(Error::Http(500))],
            None,
        ));

        dash.poll_cycle().await.unwrap();
        let err = dash.poll_cycle().await.unwrap_err();
        assert!(matches!(err, Error::Http(500)));

        let display = dash.renderer();
        assert_eq!(
            display.error.as_deref(),
            Some("Failed to fetch metrics: HTTP error! status: 500")
        );
        assert!(display.dashboard_visible);
        assert!(!display.loading_visible);
        assert_eq!(display.cpu.unwrap().label(), "45%");
        assert_eq!(display.player_count.as_deref(), Some("4 / 32"));
        assert_eq!(dash.state(), DashboardState::Stale);
    }

    #[tokio::test]
    async fn failure_before_first_success_hides_loading() {
        let mut dash = dashboard(ScriptedSource::new(vec![Err(Error::Http(503))], None));

        assert!(dash.poll_cycle().await.is_err());

        let display = dash.renderer();
        assert!(!display.loading_visible);
        assert!(!display.dashboard_visible);
        assert!(display.error.as_deref().unwrap().contains("503"));
        assert_eq!(dash.state(), DashboardState::Loading);
    }

    #[tokio::test]
    async fn recovery_clears_error_banner() {
        let parse_error = serde_json::from_str::<MetricsSnapshot>("<html>").unwrap_err();
        let mut dash = dashboard(ScriptedSource::new(
            vec![Err(Error::Parse(parse_error)), Ok(healthy())],
            None,
        ));
        let mut states = dash.watch_state();

        assert!(dash.poll_cycle().await.is_err());
        assert!(dash.renderer().error.is_some());

        dash.poll_cycle().await.unwrap();
        assert_eq!(dash.renderer().error, None);
        assert!(states.has_changed().unwrap());
        assert_eq!(*states.borrow_and_update(), DashboardState::Live);

        let stats = dash.stats();
        assert_eq!(stats.cycles, 2);
        assert_eq!(stats.parse_failures, 1);
        assert_eq!(stats.successes, 1);
    }

    #[tokio::test]
    async fn missing_status_renders_offline() {
        let mut dash = dashboard(ScriptedSource::new(vec![Ok(MetricsSnapshot::default())], None));

        dash.poll_cycle().await.unwrap();

        let display = dash.renderer();
        assert_eq!(display.server_status, Some(ServerStatus::Offline));
        assert_eq!(display.player_count.as_deref(), Some("0 / 16"));
        assert_eq!(display.error, None);
    }

    #[tokio::test]
    async fn address_prefers_metadata_then_falls_back() {
        let mut dash = dashboard(ScriptedSource::new(vec![], Some("203.0.113.7")));
        assert_eq!(dash.resolve_address().await, "203.0.113.7");
        assert_eq!(dash.renderer().server_address.as_deref(), Some("203.0.113.7"));

        let mut dash = dashboard(ScriptedSource::new(vec![], None));
        assert_eq!(dash.resolve_address().await, "localhost");
        assert_eq!(dash.renderer().server_address.as_deref(), Some("localhost"));
        assert_eq!(dash.renderer().error, None);
    }

    #[tokio::test(start_paused = true)]
    async fn polls_immediately_then_on_interval() {
        let script = (0..10).map(|_| Ok(healthy())).collect();
        let mut dash = dashboard(ScriptedSource::new(script, None));

        dash.run_until(tokio::time::sleep(Duration::from_millis(65_000)))
            .await;

        // t = 0s, 30s, 60s
        assert_eq!(dash.stats().cycles, 3);
        assert_eq!(dash.renderer().server_address.as_deref(), Some("localhost"));
    }

    #[test]
    fn invalid_time_format_falls_back() {
        let config = DashboardConfig {
            time_format: "%Q".to_string(),
            ..DashboardConfig::default()
        };
        let dash = Dashboard::new(
            ScriptedSource::new(vec![], None),
            DisplayState::new(),
            &config,
        );
        assert!(!dash.local_time().is_empty());
    }
}
