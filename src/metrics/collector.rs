use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollStats {
    pub cycles: u64,
    pub successes: u64,
    pub http_failures: u64,
    pub parse_failures: u64,
    pub transport_failures: u64,
    pub success_rate: f64,
    pub avg_fetch_time_ms: u64,
    pub elapsed_seconds: f64,
}

impl PollStats {
    pub fn failures(&self) -> u64 {
        self.http_failures + self.parse_failures + self.transport_failures
    }
}

/// Counters for poll cycles, shared cheaply between the poller and observers.
#[derive(Clone)]
pub struct PollCollector {
    cycles: Arc<AtomicU64>,
    successes: Arc<AtomicU64>,
    http_failures: Arc<AtomicU64>,
    parse_failures: Arc<AtomicU64>,
    transport_failures: Arc<AtomicU64>,
    total_fetch_time_ms: Arc<AtomicU64>,
    start_time: Arc<Instant>,
}

impl Default for PollCollector {
    fn default() -> Self {
        Self {
            cycles: Arc::new(AtomicU64::new(0)),
            successes: Arc::new(AtomicU64::new(0)),
            http_failures: Arc::new(AtomicU64::new(0)),
            parse_failures: Arc::new(AtomicU64::new(0)),
            transport_failures: Arc::new(AtomicU64::new(0)),
            total_fetch_time_ms: Arc::new(AtomicU64::new(0)),
            start_time: Arc::new(Instant::now()),
        }
    }
}

impl PollCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self, duration: Duration) {
        self.cycles.fetch_add(1, Ordering::SeqCst);
        self.successes.fetch_add(1, Ordering::SeqCst);
        self.add_fetch_time(duration);
    }

    pub fn record_failure(&self, error: &Error, duration: Duration) {
        self.cycles.fetch_add(1, Ordering::SeqCst);
        let counter = match error {
            Error::Http(_) => &self.http_failures,
            Error::Parse(_) => &self.parse_failures,
            _ => &self.transport_failures,
        };
        counter.fetch_add(1, Ordering::SeqCst);
        self.add_fetch_time(duration);
    }

    fn add_fetch_time(&self, duration: Duration) {
        self.total_fetch_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> PollStats {
        let cycles = self.cycles.load(Ordering::SeqCst);
        let successes = self.successes.load(Ordering::SeqCst);
        let total_time = self.total_fetch_time_ms.load(Ordering::SeqCst);

        let success_rate = if cycles > 0 {
            (successes as f64 / cycles as f64) * 100.0
        } else {
            0.0
        };

        let avg_fetch_time_ms = if cycles > 0 { total_time / cycles } else { 0 };

        PollStats {
            cycles,
            successes,
            http_failures: self.http_failures.load(Ordering::SeqCst),
            parse_failures: self.parse_failures.load(Ordering::SeqCst),
            transport_failures: self.transport_failures.load(Ordering::SeqCst),
            success_rate,
            avg_fetch_time_ms,
            elapsed_seconds: self.start_time.elapsed().as_secs_f64(),
        }
    }
}
