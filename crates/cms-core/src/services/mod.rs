//! Entity services - validated CRUD and listing for each resource kind.
//!
//! Services validate before touching persistence and translate repository
//! failures into [`DomainError`]s. Storage diagnostics are logged here and
//! never reach the client.

mod blog;
mod catalog;
mod contact;

pub use blog::BlogService;
pub use catalog::ServiceCatalog;
pub use contact::{ContactService, Submission};

use uuid::Uuid;

use crate::error::{DomainError, RepoError};

/// Message clients see for any persistence failure.
pub const SERVER_ERROR: &str = "Server error";

/// Map a repository failure for `entity` addressed by `key`.
fn repo_failure(entity: &'static str, key: &str, err: RepoError) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::not_found(entity, key),
        RepoError::Constraint(detail) => {
            tracing::warn!(entity, key, %detail, "Constraint violation");
            DomainError::Duplicate(format!("{entity} already exists: {key}"))
        }
        RepoError::Connection(detail) | RepoError::Query(detail) => {
            tracing::error!(entity, key, %detail, "Persistence failure");
            DomainError::Internal(SERVER_ERROR.to_string())
        }
    }
}

/// Identifiers arrive as path text; anything that is not a UUID names no
/// record.
fn parse_id(entity: &'static str, raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw.trim()).map_err(|_| DomainError::not_found(entity, raw))
}
