//! In-memory fixed-window rate limiter keyed by client address.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use cms_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

/// Rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 300,
            window: Duration::from_secs(60),
        }
    }
}

struct Window {
    started: Instant,
    hits: AtomicU32,
}

impl Window {
    fn open(now: Instant) -> Self {
        Self {
            started: now,
            hits: AtomicU32::new(0),
        }
    }
}

/// Closed windows are swept once per this many checks.
const SWEEP_EVERY: u64 = 1024;

/// Fixed-window counter per key.
///
/// Limits are per-process. Use the Redis limiter when several instances sit
/// behind one load balancer. Keys whose window has closed are dropped every
/// [`SWEEP_EVERY`] checks, so memory tracks recently active clients only.
pub struct InMemoryRateLimiter {
    windows: DashMap<String, Window>,
    checks: AtomicU64,
    config: RateLimitConfig,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            checks: AtomicU64::new(0),
            config,
        }
    }

    /// Count one hit for `key` as of `now`.
    pub fn check_at(&self, key: &str, now: Instant) -> RateLimitResult {
        let window = self.config.window;

        // Sweep before taking any shard guard; `retain` locks every shard.
        if (self.checks.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_EVERY == 0 {
            self.purge_expired(now);
        }

        // Fast path: a live window only needs a shared shard lock.
        if let Some(entry) = self.windows.get(key) {
            let elapsed = now.saturating_duration_since(entry.started);
            if elapsed < window {
                let hits = entry.hits.fetch_add(1, Ordering::Relaxed) + 1;
                return self.result(hits, window - elapsed);
            }
        }

        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert_with(|| Window::open(now));
        if now.saturating_duration_since(entry.started) >= window {
            *entry = Window::open(now);
        }
        let hits = entry.hits.fetch_add(1, Ordering::Relaxed) + 1;
        let elapsed = now.saturating_duration_since(entry.started);
        self.result(hits, window.saturating_sub(elapsed))
    }

    /// Drop windows that closed before `now`.
    pub fn purge_expired(&self, now: Instant) {
        let window = self.config.window;
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.started) < window);
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }

    fn result(&self, hits: u32, reset_after: Duration) -> RateLimitResult {
        let limit = self.config.max_requests;
        RateLimitResult {
            allowed: hits <= limit,
            limit,
            remaining: limit.saturating_sub(hits),
            reset_after,
        }
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        Ok(self.check_at(key, Instant::now()))
    }

    fn limit(&self) -> u32 {
        self.config.max_requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32, secs: u64) -> InMemoryRateLimiter {
        InMemoryRateLimiter::new(RateLimitConfig {
            max_requests,
            window: Duration::from_secs(secs),
        })
    }

    #[test]
    fn rejects_once_the_ceiling_is_passed() {
        let limiter = limiter(100, 600);
        let now = Instant::now();

        for i in 1..=100 {
            let res = limiter.check_at("10.0.0.1", now);
            assert!(res.allowed, "request {i} should pass");
            assert_eq!(res.remaining, 100 - i);
        }

        let res = limiter.check_at("10.0.0.1", now + Duration::from_secs(1));
        assert!(!res.allowed);
        assert_eq!(res.remaining, 0);
        assert_eq!(res.reset_after, Duration::from_secs(599));
    }

    #[test]
    fn keys_are_counted_independently() {
        let limiter = limiter(1, 60);
        let now = Instant::now();

        assert!(limiter.check_at("a", now).allowed);
        assert!(!limiter.check_at("a", now).allowed);
        assert!(limiter.check_at("b", now).allowed);
    }

    #[test]
    fn window_resets_after_it_elapses() {
        let limiter = limiter(2, 60);
        let start = Instant::now();

        limiter.check_at("a", start);
        limiter.check_at("a", start);
        assert!(!limiter.check_at("a", start + Duration::from_secs(59)).allowed);

        let res = limiter.check_at("a", start + Duration::from_secs(60));
        assert!(res.allowed);
        assert_eq!(res.remaining, 1);
    }

    #[test]
    fn purge_drops_closed_windows() {
        let limiter = limiter(5, 10);
        let start = Instant::now();

        limiter.check_at("a", start);
        limiter.check_at("b", start + Duration::from_secs(5));
        limiter.purge_expired(start + Duration::from_secs(12));

        assert_eq!(limiter.tracked_keys(), 1);
    }

    #[test]
    fn closed_windows_are_swept_during_checks() {
        let limiter = limiter(5, 10);
        let start = Instant::now();

        for i in 1..SWEEP_EVERY {
            limiter.check_at(&format!("10.0.{}.{}", i / 256, i % 256), start);
        }
        assert_eq!(limiter.tracked_keys(), (SWEEP_EVERY - 1) as usize);

        // The next check is the sweep point; only its own key survives.
        limiter.check_at("10.9.9.9", start + Duration::from_secs(11));

        assert_eq!(limiter.tracked_keys(), 1);
    }

    #[test]
    fn sweep_keeps_live_windows() {
        let limiter = limiter(5, 10);
        let start = Instant::now();

        limiter.check_at("live", start + Duration::from_secs(5));
        for i in 1..SWEEP_EVERY - 1 {
            limiter.check_at(&format!("old-{i}"), start);
        }
        limiter.check_at("late", start + Duration::from_secs(12));

        assert_eq!(limiter.tracked_keys(), 2);
        let res = limiter.check_at("live", start + Duration::from_secs(12));
        assert_eq!(res.remaining, 3);
    }

    #[tokio::test]
    async fn port_reports_configured_limit() {
        let limiter = limiter(7, 60);

        let res = limiter.check("a").await.unwrap();

        assert_eq!(res.limit, 7);
        assert_eq!(limiter.limit(), 7);
    }
}
