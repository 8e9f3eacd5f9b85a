//! Middleware modules.

pub mod auth;
pub mod client_addr;
pub mod error;
pub mod origin;
pub mod rate_limit;

pub use auth::Identity;
pub use client_addr::ClientAddr;
pub use error::{AppError, AppResult};
pub use origin::{OriginGate, OriginPolicy};
pub use rate_limit::RateLimit;
