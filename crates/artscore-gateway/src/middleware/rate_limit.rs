//! Process-wide request rate limiting.
//!
//! One fixed window for the whole process, not per client key. The counter
//! is an explicit object owned by the application state; there is no
//! hidden global.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

struct Window {
    /// Requests admitted in the current window.
    count: u64,
    window_start: Instant,
}

/// Fixed-window rate limiter: `max_requests` per `window`, then the
/// counter resets when the window expires.
pub struct RateLimiter {
    max_requests: u64,
    window: Duration,
    state: Mutex<Window>,
}

impl RateLimiter {
    pub fn new(max_requests: u64, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Mutex::new(Window {
                count: 0,
                window_start: Instant::now(),
            }),
        }
    }

    /// Return `true` if the request is admitted.
    pub fn check(&self) -> bool {
        let now = Instant::now();
        let mut window = self.state.lock();

        if now.duration_since(window.window_start) >= self.window {
            window.count = 0;
            window.window_start = now;
        }

        if window.count < self.max_requests {
            window.count += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_max_requests() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        assert!(limiter.check());
        assert!(limiter.check());
        assert!(limiter.check());
        assert!(!limiter.check()); // 4th request denied
    }

    #[test]
    fn expired_window_resets_the_counter() {
        // A zero-length window expires immediately, so every check starts
        // a fresh window.
        let limiter = RateLimiter::new(1, Duration::ZERO);
        assert!(limiter.check());
        assert!(limiter.check());
        assert!(limiter.check());
    }

    #[test]
    fn zero_ceiling_admits_nothing() {
        let limiter = RateLimiter::new(0, Duration::from_secs(60));
        assert!(!limiter.check());
    }
}
