//! Minimum-spacing throttle for outbound catalog requests.

use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

/// Enforces a minimum interval between consecutive calls to [`acquire`].
///
/// State is owned by the instance, so two clients only share throttling if
/// they share the limiter. Calls are expected to be sequential; the limiter
/// is `!Sync`.
///
/// [`acquire`]: RateLimiter::acquire
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last: Cell<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Cell::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until at least `interval` has passed since the previous permit,
    /// then record the new permit time.
    pub fn acquire(&self) {
        if let Some(last) = self.last.get() {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last.set(Some(Instant::now()));
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(crate::config::REQUEST_DELAY)
    }
}
