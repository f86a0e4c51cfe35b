use super::{DisplayState, Renderer};
use crate::error::Result;
use crate::view::{Gauge, ServerStatus};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Headless surface: appends the whole display state as one JSON line per cycle.
pub struct JsonOutput {
    writer: BufWriter<File>,
    state: DisplayState,
}

impl JsonOutput {
    pub fn new(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            state: DisplayState::new(),
        })
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }
}

impl Renderer for JsonOutput {
    fn set_loading_visible(&mut self, visible: bool) {
        self.state.set_loading_visible(visible);
    }

    fn set_dashboard_visible(&mut self, visible: bool) {
        self.state.set_dashboard_visible(visible);
    }

    fn show_error(&mut self, message: &str) {
        self.state.show_error(message);
    }

    fn hide_error(&mut self) {
        self.state.hide_error();
    }

    fn set_cpu_gauge(&mut self, gauge: &Gauge) {
        self.state.set_cpu_gauge(gauge);
    }

    fn set_memory_gauge(&mut self, gauge: &Gauge) {
        self.state.set_memory_gauge(gauge);
    }

    fn set_memory_details(&mut self, text: &str) {
        self.state.set_memory_details(text);
    }

    fn set_player_count(&mut self, text: &str) {
        self.state.set_player_count(text);
    }

    fn set_server_status(&mut self, status: ServerStatus) {
        self.state.set_server_status(status);
    }

    fn set_uptime(&mut self, text: &str) {
        self.state.set_uptime(text);
    }

    fn set_last_update(&mut self, text: &str) {
        self.state.set_last_update(text);
    }

    fn set_server_address(&mut self, text: &str) {
        self.state.set_server_address(text);
    }

    fn flush(&mut self) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &self.state)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Gauge;

    #[test]
    fn writes_one_line_per_flush() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.jsonl");
        let mut output = JsonOutput::new(path.clone()).unwrap();

        output.flush().unwrap();
        output.set_loading_visible(false);
        output.set_dashboard_visible(true);
        output.set_cpu_gauge(&Gauge::from_percent(91.0));
        output.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let frames: Vec<DisplayState> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(frames.len(), 2);
        assert!(frames[0].loading_visible);
        assert!(frames[1].dashboard_visible);
        assert_eq!(frames[1].cpu.map(|g| g.percent), Some(91));
    }
}
