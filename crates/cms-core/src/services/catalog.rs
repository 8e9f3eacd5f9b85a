use std::sync::Arc;

use crate::domain::{NewServicePage, ServicePage, ServicePatch, ServiceSummary};
use crate::error::DomainError;
use crate::ports::ServiceRepository;

use super::repo_failure;

const ENTITY: &str = "Service";

/// Service page lifecycle. Pages are addressed by slug.
#[derive(Clone)]
pub struct ServiceCatalog {
    pages: Arc<dyn ServiceRepository>,
}

impl ServiceCatalog {
    pub fn new(pages: Arc<dyn ServiceRepository>) -> Self {
        Self { pages }
    }

    pub async fn list(&self) -> Result<Vec<ServiceSummary>, DomainError> {
        self.pages
            .list_summaries()
            .await
            .map_err(|e| repo_failure(ENTITY, "*", e))
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        self.pages
            .count()
            .await
            .map_err(|e| repo_failure(ENTITY, "*", e))
    }

    pub async fn get(&self, slug: &str) -> Result<ServicePage, DomainError> {
        self.pages
            .find_by_slug(slug)
            .await
            .map_err(|e| repo_failure(ENTITY, slug, e))?
            .ok_or_else(|| DomainError::not_found(ENTITY, slug))
    }

    /// A taken slug surfaces as [`DomainError::Duplicate`].
    pub async fn create(&self, input: NewServicePage) -> Result<ServicePage, DomainError> {
        input.validate()?;
        let page = ServicePage::new(input);
        let slug = page.slug.clone();
        let saved = self
            .pages
            .insert(page)
            .await
            .map_err(|e| repo_failure(ENTITY, &slug, e))?;
        tracing::info!(slug = %saved.slug, "Service page created");
        Ok(saved)
    }

    pub async fn update(
        &self,
        slug: &str,
        patch: ServicePatch,
    ) -> Result<ServicePage, DomainError> {
        let mut page = self.get(slug).await?;
        patch.validate(&page.slug)?;
        page.apply(patch);
        self.pages
            .update(page)
            .await
            .map_err(|e| repo_failure(ENTITY, slug, e))
    }

    pub async fn delete(&self, slug: &str) -> Result<(), DomainError> {
        let removed = self
            .pages
            .delete_by_slug(slug)
            .await
            .map_err(|e| repo_failure(ENTITY, slug, e))?;
        if !removed {
            return Err(DomainError::not_found(ENTITY, slug));
        }
        tracing::info!(slug, "Service page deleted");
        Ok(())
    }
}
