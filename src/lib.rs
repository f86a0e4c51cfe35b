pub mod config;
pub mod dashboard;
pub mod error;
pub mod metrics;
pub mod output;
pub mod source;
pub mod uptime;
pub mod view;

pub use config::{ConfigLoader, DashboardConfig};
pub use dashboard::{Dashboard, DashboardState};
pub use error::{Error, Result};
pub use metrics::{MetricsSnapshot, PollCollector, PollStats};
pub use output::{DisplayState, Renderer};
pub use source::{HttpMetricsSource, MetricsSource};
pub use uptime::{UptimeClock, format_uptime};
