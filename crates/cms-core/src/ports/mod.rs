//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod rate_limit;
mod repository;
mod storage;

pub use auth::{ADMIN_ROLE, AuthError, PasswordService, TokenClaims, TokenService};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{BaseRepository, ContactRepository, PostRepository, ServiceRepository};
pub use storage::{
    DEFAULT_IMAGE_FORMATS, ImageUpload, ObjectStore, StorageError, StoredObject, check_format,
};
