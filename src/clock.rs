//! Injectable time source for waits.
//!
//! Scenarios never sleep directly. They go through a [`Clock`] so the idle
//! window of the session check can run against the wall clock in a real run
//! and against virtual time in tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// A source of elapsed time that can block the caller
pub trait Clock: Send + Sync {
    /// Time elapsed since the clock was created
    fn elapsed(&self) -> Duration;

    /// Block the calling scenario for the full duration
    fn sleep(&self, duration: Duration);
}

/// Wall-clock time; `sleep` blocks the thread
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        // thread::sleep may wake early on some platforms
        let deadline = Instant::now() + duration;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep(deadline - now);
        }
    }
}

/// Virtual time that only moves when slept on or advanced.
///
/// Clones share the same timeline, so a clone handed to a driver and one kept
/// by a test observe the same elapsed time.
#[derive(Debug, Clone, Default)]
pub struct SimulatedClock {
    elapsed_ms: Arc<AtomicU64>,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move virtual time forward without a caller sleeping
    pub fn advance(&self, duration: Duration) {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.elapsed_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for SimulatedClock {
    fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms.load(Ordering::SeqCst))
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
