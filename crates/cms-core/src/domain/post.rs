use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::Violations;
use crate::error::DomainError;

/// Author recorded when a post is submitted without one.
pub const DEFAULT_AUTHOR: &str = "Admin";
pub const DEFAULT_READ_TIME: &str = "5 min";
pub const DEFAULT_VIEWS: &str = "0";

/// Post entity - represents a blog article.
///
/// `read`, `views` and `date` are display strings consumed as-is by the
/// front-end, so they are stored as text rather than numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "cat")]
    pub category: String,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub cover: String,
    pub author: String,
    #[serde(rename = "read")]
    pub read_time: String,
    pub views: String,
    pub date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a post.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    #[serde(rename = "cat")]
    pub category: String,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub cover: String,
    pub author: Option<String>,
    #[serde(rename = "read")]
    pub read_time: Option<String>,
    pub views: Option<String>,
    pub date: Option<String>,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut violations = Violations::new();
        violations.require(&self.title, "Title is required");
        violations.require(&self.category, "Category is required");
        violations.require(&self.excerpt, "Excerpt is required");
        violations.require(&self.content, "Content is required");
        violations.require(&self.cover, "Cover image is required");
        violations.into_result()
    }
}

/// Full or partial replacement of a post's editable fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostPatch {
    pub title: Option<String>,
    #[serde(rename = "cat")]
    pub category: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub cover: Option<String>,
    pub author: Option<String>,
    #[serde(rename = "read")]
    pub read_time: Option<String>,
    pub views: Option<String>,
    pub date: Option<String>,
}

impl PostPatch {
    /// Required fields may be replaced but never blanked.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut violations = Violations::new();
        let required = [
            (&self.title, "Title cannot be empty"),
            (&self.category, "Category cannot be empty"),
            (&self.excerpt, "Excerpt cannot be empty"),
            (&self.content, "Content cannot be empty"),
            (&self.cover, "Cover image cannot be empty"),
        ];
        for (value, message) in required {
            if let Some(value) = value {
                violations.require(value, message);
            }
        }
        violations.into_result()
    }
}

impl Post {
    /// Create a new post from a validated payload.
    pub fn new(input: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title.trim().to_string(),
            category: input.category.trim().to_string(),
            excerpt: input.excerpt,
            content: input.content,
            tags: input.tags,
            featured: input.featured,
            cover: input.cover.trim().to_string(),
            author: author_or_default(input.author),
            read_time: input
                .read_time
                .unwrap_or_else(|| DEFAULT_READ_TIME.to_string()),
            views: input.views.unwrap_or_else(|| DEFAULT_VIEWS.to_string()),
            date: input
                .date
                .unwrap_or_else(|| now.format("%-m/%-d/%Y").to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a validated patch in place.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(category) = patch.category {
            self.category = category.trim().to_string();
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(cover) = patch.cover {
            self.cover = cover.trim().to_string();
        }
        if patch.author.is_some() {
            self.author = author_or_default(patch.author);
        }
        if let Some(read_time) = patch.read_time {
            self.read_time = read_time;
        }
        if let Some(views) = patch.views {
            self.views = views;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        self.updated_at = Utc::now();
    }
}

fn author_or_default(author: Option<String>) -> String {
    author
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string())
}
