//! Rate limiting port.

use async_trait::async_trait;
use std::time::Duration;

/// Rate limiter trait - abstraction over rate limiting backends.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count one hit against `key` and report whether it is within the ceiling.
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;

    /// Ceiling per window.
    fn limit(&self) -> u32;
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the current window closes.
    pub reset_after: Duration,
}

impl RateLimitResult {
    /// Whole seconds a rejected client should wait, never less than one so
    /// `Retry-After: 0` is not sent while the window is still closing.
    pub fn retry_after_secs(&self) -> u64 {
        let secs = self.reset_after.as_secs();
        if self.reset_after.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs.max(1)
        }
    }
}

/// Rate limit errors. Callers fail open on these.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(reset_after: Duration) -> RateLimitResult {
        RateLimitResult {
            allowed: false,
            limit: 100,
            remaining: 0,
            reset_after,
        }
    }

    #[test]
    fn retry_after_rounds_up_and_is_at_least_one_second() {
        assert_eq!(rejected(Duration::from_secs(599)).retry_after_secs(), 599);
        assert_eq!(rejected(Duration::from_millis(1500)).retry_after_secs(), 2);
        assert_eq!(rejected(Duration::from_millis(200)).retry_after_secs(), 1);
        assert_eq!(rejected(Duration::ZERO).retry_after_secs(), 1);
    }
}
