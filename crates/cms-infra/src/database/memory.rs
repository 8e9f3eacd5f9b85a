//! In-memory repositories - used when no database is configured and by tests.

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use cms_core::domain::{
    ContactFilter, ContactMessage, Page, PageRequest, Post, ServicePage, ServiceSummary,
};
use cms_core::error::RepoError;
use cms_core::ports::{BaseRepository, ContactRepository, PostRepository, ServiceRepository};

/// What the in-memory store needs to know about an entity.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;

    /// A secondary key that must stay unique across records.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

impl Record for Post {
    fn id(&self) -> Uuid {
        self.id
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for ServicePage {
    fn id(&self) -> Uuid {
        self.id
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn unique_key(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl Record for ContactMessage {
    fn id(&self) -> Uuid {
        self.id
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Vec-backed store kept in insertion order.
pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryServiceRepository = InMemoryRepository<ServicePage>;
pub type InMemoryContactRepository = InMemoryRepository<ContactMessage>;

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matching records, newest first. Ties go to the later insert.
    async fn newest_first(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let records = self.records.read().await;
        let mut matched: Vec<T> = records.iter().rev().filter(|&r| keep(r)).cloned().collect();
        matched.sort_by_key(|r| Reverse(r.created_at()));
        matched
    }
}

#[async_trait]
impl<T: Record> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == entity.id()) {
            return Err(RepoError::Constraint(format!("id {}", entity.id())));
        }
        if let Some(key) = entity.unique_key() {
            if records.iter().any(|r| r.unique_key() == Some(key)) {
                return Err(RepoError::Constraint(format!("key {key}")));
            }
        }
        records.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == entity.id())
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() < before)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.records.read().await.len() as u64)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.newest_first(|_| true).await)
    }
}

#[async_trait]
impl ServiceRepository for InMemoryServiceRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ServicePage>, RepoError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|p| p.slug == slug).cloned())
    }

    async fn list_summaries(&self) -> Result<Vec<ServiceSummary>, RepoError> {
        let pages = self.newest_first(|_| true).await;
        Ok(pages.iter().map(ServiceSummary::from).collect())
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<bool, RepoError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|p| p.slug != slug);
        Ok(records.len() < before)
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn search(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<Page<ContactMessage>, RepoError> {
        let matched = self.newest_first(|m| filter.matches(m)).await;
        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.limit as usize)
            .collect();
        Ok(Page::new(items, total, page))
    }
}
