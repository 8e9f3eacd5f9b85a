use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{Violations, is_valid_slug};
use crate::error::DomainError;

/// Service page entity. Addressed externally by its slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePage {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub detail: Option<ServiceDetail>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rich content shown on a service's own page.
///
/// Every key is optional and omitted from JSON when unset, so a stored block
/// reads back exactly as it was written. The same shape doubles as a patch:
/// see [`ServiceDetail::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<Metric>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toc: Option<Vec<TocEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approach_blocks: Option<Vec<ApproachBlock>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process: Option<Vec<ProcessStep>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<SubService>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cases: Option<Vec<CaseStudy>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Vec<PricingTier>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faqs: Option<Vec<Faq>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocEntry {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApproachBlock {
    pub title: String,
    pub text: String,
    pub img: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessStep {
    pub step: String,
    pub title: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubService {
    pub icon: String,
    pub title: String,
    pub pts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseStudy {
    pub logo: String,
    pub title: String,
    pub img: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingTier {
    pub title: String,
    pub desc: String,
    pub price: String,
    pub includes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Faq {
    pub q: String,
    pub a: String,
}

impl ServiceDetail {
    /// Overwrite the keys present in `update`; absent keys keep their value.
    pub fn merge(&mut self, update: ServiceDetail) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.tag, update.tag);
        take(&mut self.hero_img, update.hero_img);
        take(&mut self.summary, update.summary);
        take(&mut self.metrics, update.metrics);
        take(&mut self.trust, update.trust);
        take(&mut self.toc, update.toc);
        take(&mut self.approach_blocks, update.approach_blocks);
        take(&mut self.process, update.process);
        take(&mut self.services, update.services);
        take(&mut self.cases, update.cases);
        take(&mut self.pricing, update.pricing);
        take(&mut self.faqs, update.faqs);
    }
}

/// Lightweight projection returned by the service list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub slug: String,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub icon: Option<String>,
}

impl From<&ServicePage> for ServiceSummary {
    fn from(page: &ServicePage) -> Self {
        Self {
            slug: page.slug.clone(),
            title: page.title.clone(),
            text: page.text.clone(),
            image: page.image.clone(),
            icon: page.icon.clone(),
        }
    }
}

/// Payload for creating a service page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewServicePage {
    pub slug: String,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub detail: Option<ServiceDetail>,
}

impl NewServicePage {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut violations = Violations::new();
        let slug = self.slug.trim();
        if slug.is_empty() {
            violations.check(false, "Slug is required");
        } else {
            violations.check(
                is_valid_slug(slug),
                "Slug may only contain lowercase letters, digits and hyphens",
            );
        }
        violations.require(&self.title, "Title is required");
        violations.require(&self.text, "Text is required");
        violations.into_result()
    }
}

/// Update for a service page. `detail` is merged key by key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicePatch {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub detail: Option<ServiceDetail>,
}

impl ServicePatch {
    pub fn validate(&self, current_slug: &str) -> Result<(), DomainError> {
        let mut violations = Violations::new();
        if let Some(slug) = &self.slug {
            violations.check(slug.trim() == current_slug, "Slug cannot be changed");
        }
        if let Some(title) = &self.title {
            violations.require(title, "Title cannot be empty");
        }
        if let Some(text) = &self.text {
            violations.require(text, "Text cannot be empty");
        }
        violations.into_result()
    }
}

impl ServicePage {
    /// Create a new service page from a validated payload.
    pub fn new(input: NewServicePage) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: input.slug.trim().to_string(),
            title: input.title.trim().to_string(),
            text: input.text,
            image: input.image,
            icon: input.icon,
            detail: input.detail,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a validated patch in place. The slug never changes.
    pub fn apply(&mut self, patch: ServicePatch) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(text) = patch.text {
            self.text = text;
        }
        if patch.image.is_some() {
            self.image = patch.image;
        }
        if patch.icon.is_some() {
            self.icon = patch.icon;
        }
        if let Some(update) = patch.detail {
            match &mut self.detail {
                Some(detail) => detail.merge(update),
                None => self.detail = Some(update),
            }
        }
        self.updated_at = Utc::now();
    }
}
