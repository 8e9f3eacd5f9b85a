use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{
    ClientInfo, ContactFilter, ContactMessage, ContactPatch, ContactSubmission, Page, PageRequest,
};
use crate::error::DomainError;
use crate::ports::ContactRepository;

use super::{parse_id, repo_failure};

const ENTITY: &str = "Contact";

/// Outcome of a public contact-form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Accepted(Uuid),
    /// Honeypot tripped. Nothing was stored.
    Spam,
}

/// Contact inbox lifecycle.
#[derive(Clone)]
pub struct ContactService {
    messages: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(messages: Arc<dyn ContactRepository>) -> Self {
        Self { messages }
    }

    /// The honeypot check runs before validation, so bots get a quiet 200.
    pub async fn submit(
        &self,
        submission: ContactSubmission,
        client: ClientInfo,
    ) -> Result<Submission, DomainError> {
        if submission.is_spam() {
            tracing::info!(ip = %client.ip, "Honeypot tripped, submission dropped");
            return Ok(Submission::Spam);
        }
        submission.validate()?;

        let message = ContactMessage::new(submission, client);
        let id = message.id;
        self.messages
            .insert(message)
            .await
            .map_err(|e| repo_failure(ENTITY, &id.to_string(), e))?;
        tracing::info!(message_id = %id, "Contact message received");
        Ok(Submission::Accepted(id))
    }

    pub async fn list(
        &self,
        filter: &ContactFilter,
        page: PageRequest,
    ) -> Result<Page<ContactMessage>, DomainError> {
        self.messages
            .search(filter, page)
            .await
            .map_err(|e| repo_failure(ENTITY, "*", e))
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        self.messages
            .count()
            .await
            .map_err(|e| repo_failure(ENTITY, "*", e))
    }

    pub async fn get(&self, id: &str) -> Result<ContactMessage, DomainError> {
        let uuid = parse_id(ENTITY, id)?;
        self.messages
            .find_by_id(uuid)
            .await
            .map_err(|e| repo_failure(ENTITY, id, e))?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn update(
        &self,
        id: &str,
        patch: ContactPatch,
    ) -> Result<ContactMessage, DomainError> {
        patch.validate()?;
        let mut message = self.get(id).await?;
        message.apply(patch);
        self.messages
            .update(message)
            .await
            .map_err(|e| repo_failure(ENTITY, id, e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let uuid = parse_id(ENTITY, id)?;
        let removed = self
            .messages
            .delete(uuid)
            .await
            .map_err(|e| repo_failure(ENTITY, id, e))?;
        if !removed {
            return Err(DomainError::not_found(ENTITY, id));
        }
        Ok(())
    }
}
