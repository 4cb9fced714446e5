//! Wall-clock Timing
//!
//! Durations are reported in fractional milliseconds. `std::time::Instant`
//! is monotonic with sub-microsecond resolution on every supported platform.

use std::time::{Duration, Instant};

/// Timer for measuring a single invocation
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since start, in milliseconds
    #[inline(always)]
    pub fn elapsed_ms(&self) -> f64 {
        duration_ms(self.start.elapsed())
    }
}

/// Convert a `Duration` to fractional milliseconds
#[inline]
pub fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
