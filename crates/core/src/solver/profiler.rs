//! Timing helpers for the recompute path
//!
//! RAII scopes that report elapsed time through `tracing` when dropped, and a
//! frame timer the front ends read for their status line.

use std::time::Instant;
use tracing::trace;

/// A profiling scope that measures elapsed time using RAII.
///
/// Elapsed time is emitted at `trace` level when the scope is dropped.
pub struct ProfilerScope {
    start: Instant,
    name: &'static str,
}

impl ProfilerScope {
    /// Creates a new profiling scope.
    pub fn new(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    /// Gets elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ProfilerScope {
    fn drop(&mut self) {
        trace!(scope = self.name, elapsed_ms = self.elapsed_ms(), "profiler scope");
    }
}

/// Last and smoothed duration of the recompute-and-render cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTimer {
    last_frame_time_ms: f64,
    smoothed_ms: Option<f64>,
}

impl FrameTimer {
    /// Creates a new frame timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records frame time in milliseconds.
    pub fn record(&mut self, time_ms: f64) {
        self.last_frame_time_ms = time_ms;
        // EWMA with 0.1 smoothing
        self.smoothed_ms = Some(match self.smoothed_ms {
            None => time_ms,
            Some(prev) => 0.9 * prev + 0.1 * time_ms,
        });
    }

    /// Gets the last recorded frame time.
    pub fn last_frame_time_ms(&self) -> f64 {
        self.last_frame_time_ms
    }

    /// Exponentially smoothed frame time, 0 before the first record.
    pub fn smoothed_frame_time_ms(&self) -> f64 {
        self.smoothed_ms.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_profiler_scope_measures_time() {
        let scope = ProfilerScope::new("test");
        thread::sleep(Duration::from_millis(10));
        let elapsed = scope.elapsed_ms();
        assert!(elapsed >= 10.0, "Expected at least 10ms, got {elapsed}");
    }

    #[test]
    fn test_frame_timer() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.last_frame_time_ms(), 0.0);
        assert_eq!(timer.smoothed_frame_time_ms(), 0.0);

        timer.record(10.0);
        assert_eq!(timer.last_frame_time_ms(), 10.0);
        assert_eq!(timer.smoothed_frame_time_ms(), 10.0);

        timer.record(20.0);
        assert_eq!(timer.last_frame_time_ms(), 20.0);
        assert!((timer.smoothed_frame_time_ms() - 11.0).abs() < 1e-9);
    }
}
