pub mod collector;
pub mod snapshot;

pub use collector::{PollCollector, PollStats};
pub use snapshot::MetricsSnapshot;
