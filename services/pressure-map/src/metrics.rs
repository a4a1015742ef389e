//! Session metrics collection.
//!
//! Counters are kept locally for the snapshot printed by the CLI and also
//! emitted through the `metrics` facade for whichever recorder is installed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct MetricsCollector {
    pub fetches_total: AtomicU64,
    pub fetch_failures: AtomicU64,
    pub stale_responses: AtomicU64,
    pub renders_total: AtomicU64,
    pub cells_drawn: AtomicU64,

    /// Render timing (microseconds)
    render_total_us: AtomicU64,
    render_last_us: AtomicU64,

    start_time: Instant,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            fetches_total: AtomicU64::new(0),
            fetch_failures: AtomicU64::new(0),
            stale_responses: AtomicU64::new(0),
            renders_total: AtomicU64::new(0),
            cells_drawn: AtomicU64::new(0),
            render_total_us: AtomicU64::new(0),
            render_last_us: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a successful fetch of `readings` readings.
    pub fn record_fetch(&self, readings: usize) {
        self.fetches_total.fetch_add(1, Ordering::Relaxed);
        counter!("readings_fetches_total").increment(1);
        gauge!("readings_loaded").set(readings as f64);
    }

    pub fn record_fetch_failure(&self) {
        self.fetches_total.fetch_add(1, Ordering::Relaxed);
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
        counter!("readings_fetch_failures_total").increment(1);
    }

    /// Record a response dropped because a newer one was already applied.
    pub fn record_stale_response(&self) {
        self.stale_responses.fetch_add(1, Ordering::Relaxed);
        counter!("stale_responses_total").increment(1);
    }

    /// Record one recompute of the draw list.
    pub fn record_render(&self, duration_us: u64, cells: usize, interpolated: usize) {
        self.renders_total.fetch_add(1, Ordering::Relaxed);
        self.cells_drawn.store(cells as u64, Ordering::Relaxed);
        self.render_total_us.fetch_add(duration_us, Ordering::Relaxed);
        self.render_last_us.store(duration_us, Ordering::Relaxed);

        counter!("renders_total").increment(1);
        gauge!("cells_drawn").set(cells as f64);
        gauge!("cells_interpolated").set(interpolated as f64);
        histogram!("render_duration_ms").record(duration_us as f64 / 1000.0);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let renders = self.renders_total.load(Ordering::Relaxed);
        let total_us = self.render_total_us.load(Ordering::Relaxed);

        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            fetches_total: self.fetches_total.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            stale_responses: self.stale_responses.load(Ordering::Relaxed),
            renders_total: renders,
            cells_drawn: self.cells_drawn.load(Ordering::Relaxed),
            render_avg_ms: if renders == 0 {
                0.0
            } else {
                (total_us as f64 / renders as f64) / 1000.0
            },
            render_last_ms: self.render_last_us.load(Ordering::Relaxed) as f64 / 1000.0,
        }
    }
}

/// Point-in-time copy of the collected counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub fetches_total: u64,
    pub fetch_failures: u64,
    pub stale_responses: u64,
    pub renders_total: u64,
    pub cells_drawn: u64,
    pub render_avg_ms: f64,
    pub render_last_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_average() {
        let metrics = MetricsCollector::new();
        metrics.record_render(2_000, 10, 3);
        metrics.record_render(4_000, 12, 0);

        let snap = metrics.snapshot();
        assert_eq!(snap.renders_total, 2);
        assert_eq!(snap.cells_drawn, 12);
        assert_eq!(snap.render_avg_ms, 3.0);
        assert_eq!(snap.render_last_ms, 4.0);
    }

    #[test]
    fn test_failures_count_as_fetches() {
        let metrics = MetricsCollector::new();
        metrics.record_fetch(5);
        metrics.record_fetch_failure();

        let snap = metrics.snapshot();
        assert_eq!(snap.fetches_total, 2);
        assert_eq!(snap.fetch_failures, 1);
    }
}
