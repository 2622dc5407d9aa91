//! Rate limiter timing tests.

use scryfall_import::RateLimiter;
use std::time::{Duration, Instant};

#[test]
fn first_acquire_does_not_wait() {
    let limiter = RateLimiter::new(Duration::from_secs(5));
    let start = Instant::now();
    limiter.acquire();
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn consecutive_acquires_are_spaced() {
    let limiter = RateLimiter::new(Duration::from_millis(50));
    let start = Instant::now();
    limiter.acquire();
    limiter.acquire();
    limiter.acquire();
    assert!(start.elapsed() >= Duration::from_millis(100));
}

#[test]
fn no_wait_once_interval_has_passed() {
    let limiter = RateLimiter::new(Duration::from_millis(20));
    limiter.acquire();
    std::thread::sleep(Duration::from_millis(40));

    let start = Instant::now();
    limiter.acquire();
    assert!(start.elapsed() < Duration::from_millis(20));
}

#[test]
fn limiters_do_not_share_state() {
    let a = RateLimiter::new(Duration::from_secs(5));
    let b = RateLimiter::new(Duration::from_secs(5));
    a.acquire();

    let start = Instant::now();
    b.acquire();
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn default_interval_is_100ms() {
    assert_eq!(RateLimiter::default().interval(), Duration::from_millis(100));
}
