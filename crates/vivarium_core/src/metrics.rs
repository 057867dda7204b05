//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and metrics tracking for monitoring
//! simulation throughput and health.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics collector for simulation statistics.
pub struct Metrics {
    step_count: AtomicU64,
    alive_count: AtomicU64,
    event_count: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            step_count: AtomicU64::new(0),
            alive_count: AtomicU64::new(0),
            event_count: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed simulation step with its duration.
    pub fn record_step(&self, duration: Duration, alive: usize, active_events: usize) {
        self.step_count.fetch_add(1, Ordering::Relaxed);
        self.alive_count.store(alive as u64, Ordering::Relaxed);
        self.event_count.store(active_events as u64, Ordering::Relaxed);

        // Log at info level every 1000 steps
        let step = self.step_count.load(Ordering::Relaxed);
        if step % 1000 == 0 {
            tracing::info!(
                step = step,
                alive = alive,
                active_events = active_events,
                duration_us = duration.as_micros() as u64,
                "Simulation step"
            );
        }
    }

    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count.load(Ordering::Relaxed)
    }

    /// Live-cell count observed at the most recent step.
    #[must_use]
    pub fn alive_count(&self) -> u64 {
        self.alive_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.event_count.load(Ordering::Relaxed)
    }

    /// Elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.step_count(), 0);
    }

    #[test]
    fn test_record_step() {
        let metrics = Metrics::new();
        metrics.record_step(Duration::from_millis(4), 250, 2);
        assert_eq!(metrics.step_count(), 1);
        assert_eq!(metrics.alive_count(), 250);
        assert_eq!(metrics.event_count(), 2);
    }
}
