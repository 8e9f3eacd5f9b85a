use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    ContactFilter, ContactMessage, Page, PageRequest, Post, ServicePage, ServiceSummary,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. `RepoError::NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Returns whether a row was removed.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Every post, newest first.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;
}

/// Service page repository. Slugs are unique; inserting a taken slug is a
/// `RepoError::Constraint`.
#[async_trait]
pub trait ServiceRepository: BaseRepository<ServicePage, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ServicePage>, RepoError>;

    /// List projection, newest first.
    async fn list_summaries(&self) -> Result<Vec<ServiceSummary>, RepoError>;

    async fn delete_by_slug(&self, slug: &str) -> Result<bool, RepoError>;
}

/// Contact inbox repository.
#[async_trait]
pub trait ContactRepository: BaseRepository<ContactMessage, Uuid> {
    /// Filtered window, newest first, with the filter's total match count.
    async fn search(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<Page<ContactMessage>, RepoError>;
}
