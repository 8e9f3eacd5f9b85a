use std::sync::Arc;

use crate::domain::{NewPost, Post, PostPatch};
use crate::error::DomainError;
use crate::ports::PostRepository;

use super::{parse_id, repo_failure};

const ENTITY: &str = "Blog";

/// Blog post lifecycle.
#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
}

impl BlogService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Every post, newest first.
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        self.posts
            .list_recent()
            .await
            .map_err(|e| repo_failure(ENTITY, "*", e))
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        self.posts
            .count()
            .await
            .map_err(|e| repo_failure(ENTITY, "*", e))
    }

    pub async fn get(&self, id: &str) -> Result<Post, DomainError> {
        let uuid = parse_id(ENTITY, id)?;
        self.posts
            .find_by_id(uuid)
            .await
            .map_err(|e| repo_failure(ENTITY, id, e))?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        input.validate()?;
        let post = Post::new(input);
        let id = post.id.to_string();
        let saved = self
            .posts
            .insert(post)
            .await
            .map_err(|e| repo_failure(ENTITY, &id, e))?;
        tracing::info!(post_id = %saved.id, "Post created");
        Ok(saved)
    }

    pub async fn update(&self, id: &str, patch: PostPatch) -> Result<Post, DomainError> {
        patch.validate()?;
        let mut post = self.get(id).await?;
        post.apply(patch);
        self.posts
            .update(post)
            .await
            .map_err(|e| repo_failure(ENTITY, id, e))
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let uuid = parse_id(ENTITY, id)?;
        let removed = self
            .posts
            .delete(uuid)
            .await
            .map_err(|e| repo_failure(ENTITY, id, e))?;
        if !removed {
            return Err(DomainError::not_found(ENTITY, id));
        }
        tracing::info!(post_id = %uuid, "Post deleted");
        Ok(())
    }
}
