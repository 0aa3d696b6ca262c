//! # Web Rate Limiting
//!
//! Sliding-window request limits per client address, backed by DashMap
//! for lock-free concurrent access. Applied to the mutating web routes
//! so a misbehaving client cannot flood the reminder store.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Every this-many checks, entries whose whole window has expired are
/// dropped so the map does not grow with the number of distinct clients.
const PURGE_EVERY: usize = 1024;

#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<DashMap<String, Vec<Instant>>>,
    max_requests: usize,
    time_window: Duration,
    checks: Arc<AtomicUsize>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, time_window: Duration) -> Self {
        RateLimiter {
            requests: Arc::new(DashMap::new()),
            max_requests,
            time_window,
            checks: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Record one request for `client` and report whether it is allowed.
    pub fn check(&self, client: &str) -> bool {
        if self.checks.fetch_add(1, Ordering::Relaxed) % PURGE_EVERY == PURGE_EVERY - 1 {
            self.purge_expired();
        }

        let now = Instant::now();
        let mut entry = self.requests.entry(client.to_string()).or_default();

        entry.retain(|&time| now.duration_since(time) < self.time_window);

        if entry.len() >= self.max_requests {
            false
        } else {
            entry.push(now);
            true
        }
    }

    /// Drop clients with no request inside the current window.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.requests
            .retain(|_, times| times.iter().any(|&t| now.duration_since(t) < self.time_window));
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.requests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn test_allows_under_limit() {
        let limiter = RateLimiter::new(3, Duration::from_secs(1));

        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("1.2.3.4"));
    }

    #[test]
    fn test_blocks_over_limit() {
        let limiter = RateLimiter::new(2, Duration::from_secs(1));

        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));
    }

    #[tokio::test]
    async fn test_resets_after_window() {
        let limiter = RateLimiter::new(1, Duration::from_millis(100));

        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));

        sleep(Duration::from_millis(150)).await;
        assert!(limiter.check("1.2.3.4"));
    }

    #[tokio::test]
    async fn test_purge_drops_idle_clients() {
        let limiter = RateLimiter::new(1, Duration::from_millis(50));

        limiter.check("1.2.3.4");
        limiter.check("5.6.7.8");
        assert_eq!(limiter.tracked_clients(), 2);

        sleep(Duration::from_millis(80)).await;
        limiter.check("9.9.9.9");
        limiter.purge_expired();

        // Only the client still inside the window survives
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(1));

        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("5.6.7.8"));
        assert!(!limiter.check("1.2.3.4"));
        assert!(!limiter.check("5.6.7.8"));
    }
}
