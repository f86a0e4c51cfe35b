use crate::error::Result;
use crate::view::{Gauge, ServerStatus};

pub mod console;
pub mod display;
pub mod json;

pub use display::DisplayState;

/// A display surface with one update per semantic region.
pub trait Renderer: Send {
    fn set_loading_visible(&mut self, visible: bool);
    fn set_dashboard_visible(&mut self, visible: bool);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
    fn set_cpu_gauge(&mut self, gauge: &Gauge);
    fn set_memory_gauge(&mut self, gauge: &Gauge);
    fn set_memory_details(&mut self, text: &str);
    fn set_player_count(&mut self, text: &str);
    fn set_server_status(&mut self, status: ServerStatus);
    fn set_uptime(&mut self, text: &str);
    fn set_last_update(&mut self, text: &str);
    fn set_server_address(&mut self, text: &str);

    /// Called once at the end of every cycle.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn set_loading_visible(&mut self, visible: bool) {
        (**self).set_loading_visible(visible)
    }
    fn set_dashboard_visible(&mut self, visible: bool) {
        (**self).set_dashboard_visible(visible)
    }
    fn show_error(&mut self, message: &str) {
        (**self).show_error(message)
    }
    fn hide_error(&mut self) {
        (**self).hide_error()
    }
    fn set_cpu_gauge(&mut self, gauge: &Gauge) {
        (**self).set_cpu_gauge(gauge)
    }
    fn set_memory_gauge(&mut self, gauge: &Gauge) {
        (**self).set_memory_gauge(gauge)
    }
    fn set_memory_details(&mut self, text: &str) {
        (**self).set_memory_details(text)
    }
    fn set_player_count(&mut self, text: &str) {
        (**self).set_player_count(text)
    }
    fn set_server_status(&mut self, status: ServerStatus) {
        (**self).set_server_status(status)
    }
    fn set_uptime(&mut self, text: &str) {
        (**self).set_uptime(text)
    }
    fn set_last_update(&mut self, text: &str) {
        (**self).set_last_update(text)
    }
    fn set_server_address(&mut self, text: &str) {
        (**self).set_server_address(text)
    }
    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
