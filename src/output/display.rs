use super::Renderer;
use crate::view::{Gauge, ServerStatus};
use serde::{Deserialize, Serialize};

/// In-memory region tree. Starts with only the loading indicator visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    pub loading_visible: bool,
    pub dashboard_visible: bool,
    pub error: Option<String>,
    pub cpu: Option<Gauge>,
    pub memory: Option<Gauge>,
    pub memory_details: Option<String>,
    pub player_count: Option<String>,
    pub server_status: Option<ServerStatus>,
    pub uptime: Option<String>,
    pub last_update: Option<String>,
    pub server_address: Option<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            loading_visible: true,
            dashboard_visible: false,
            error: None,
            cpu: None,
            memory: None,
            memory_details: None,
            player_count: None,
            server_status: None,
            uptime: None,
            last_update: None,
            server_address: None,
        }
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for DisplayState {
    fn set_loading_visible(&mut self, visible: bool) {
        self.loading_visible = visible;
    }

    fn set_dashboard_visible(&mut self, visible: bool) {
        self.dashboard_visible = visible;
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.error = None;
    }

    fn set_cpu_gauge(&mut self, gauge: &Gauge) {
        self.cpu = Some(*gauge);
    }

    fn set_memory_gauge(&mut self, gauge: &Gauge) {
        self.memory = Some(*gauge);
    }

    fn set_memory_details(&mut self, text: &str) {
        self.memory_details = Some(text.to_string());
    }

    fn set_player_count(&mut self, text: &str) {
        self.player_count = Some(text.to_string());
    }

    fn set_server_status(&mut self, status: ServerStatus) {
        self.server_status = Some(status);
    }

    fn set_uptime(&mut self, text: &str) {
        self.uptime = Some(text.to_string());
    }

    fn set_last_update(&mut self, text: &str) {
        self.last_update = Some(text.to_string());
    }

    fn set_server_address(&mut self, text: &str) {
        self.server_address = Some(text.to_string());
    }
}
