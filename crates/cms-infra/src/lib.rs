//! # CMS Infrastructure
//!
//! Concrete implementations of the ports defined in `cms-core`.
//! This crate contains persistence, rate limiting, credential and object
//! storage integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory adapters only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `redis` - Redis-backed rate limiting for multi-instance deployments
//! - `cloudinary` - Signed image uploads to Cloudinary

pub mod database;
pub mod rate_limit;
pub mod storage;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{
    DatabaseConfig, DatabaseConnections, InMemoryContactRepository, InMemoryPostRepository,
    InMemoryServiceRepository,
};
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
pub use storage::{CloudinaryConfig, InMemoryObjectStore};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService, PLACEHOLDER_SECRET};

#[cfg(feature = "postgres")]
pub use database::{
    PostgresContactRepository, PostgresPostRepository, PostgresServiceRepository,
};

#[cfg(feature = "redis")]
pub use rate_limit::{RedisConfig, RedisRateLimitConfig, RedisRateLimiter};

#[cfg(feature = "cloudinary")]
pub use storage::CloudinaryStore;
