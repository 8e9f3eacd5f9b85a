//! Redis rate limiter: one fixed-window counter per key, shared by every
//! instance pointing at the same Redis.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, Script};

use cms_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    pub connect_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Redis rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RedisRateLimitConfig {
    pub redis: RedisConfig,
    /// Maximum requests per window
    pub max_requests: u32,
    pub window: Duration,
    /// Namespaces the keys of one limiter (`global`, `contact`).
    pub key_prefix: String,
}

impl Default for RedisRateLimitConfig {
    fn default() -> Self {
        Self {
            redis: RedisConfig::default(),
            max_requests: 300,
            window: Duration::from_secs(60),
            key_prefix: "ratelimit".to_string(),
        }
    }
}

/// INCR with an EXPIRE on the first hit. Returns `{count, ttl}`.
const FIXED_WINDOW_SCRIPT: &str = r#"
local current = redis.call('INCR', KEYS[1])
if current == 1 then
    redis.call('EXPIRE', KEYS[1], ARGV[1])
end
local ttl = redis.call('TTL', KEYS[1])
return {current, ttl}
"#;

/// Redis-backed fixed-window rate limiter.
pub struct RedisRateLimiter {
    conn: ConnectionManager,
    config: RedisRateLimitConfig,
    script: Script,
}

impl RedisRateLimiter {
    pub async fn new(config: RedisRateLimitConfig) -> Result<Self, RateLimitError> {
        let client = Client::open(config.redis.url.as_str())
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        // Bounded so an unreachable Redis cannot hang startup.
        let conn = tokio::time::timeout(config.redis.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| RateLimitError::Backend("Connection timed out".to_string()))?
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        tracing::info!(prefix = %config.key_prefix, "Connected to Redis rate limiter");

        Ok(Self {
            conn,
            config,
            script: Script::new(FIXED_WINDOW_SCRIPT),
        })
    }

    /// Share the connection of an existing limiter under another namespace.
    pub fn with_namespace(&self, key_prefix: &str, max_requests: u32, window: Duration) -> Self {
        Self {
            conn: self.conn.clone(),
            config: RedisRateLimitConfig {
                redis: self.config.redis.clone(),
                max_requests,
                window,
                key_prefix: key_prefix.to_string(),
            },
            script: Script::new(FIXED_WINDOW_SCRIPT),
        }
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}:{}", self.config.key_prefix, key)
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        let redis_key = self.make_key(key);
        let mut conn = self.conn.clone();

        let result: Vec<i64> = self
            .script
            .key(&redis_key)
            .arg(self.config.window.as_secs().max(1))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| RateLimitError::Backend(e.to_string()))?;

        let hits = result.first().copied().unwrap_or(1).max(0) as u32;
        let ttl_secs = result
            .get(1)
            .copied()
            .unwrap_or(self.config.window.as_secs() as i64)
            .max(1) as u64;

        let limit = self.config.max_requests;
        Ok(RateLimitResult {
            allowed: hits <= limit,
            limit,
            remaining: limit.saturating_sub(hits),
            reset_after: Duration::from_secs(ttl_secs),
        })
    }

    fn limit(&self) -> u32 {
        self.config.max_requests
    }
}
