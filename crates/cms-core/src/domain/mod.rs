//! Domain entities - the core business objects.

mod contact;
mod pagination;
mod post;
mod service;
pub mod validation;

pub use contact::{
    ClientInfo, ContactFilter, ContactMessage, ContactPatch, ContactSubmission, DEFAULT_SOURCE,
    NOTE_MAX_CHARS,
};
pub use pagination::{MAX_PAGE_SIZE, MIN_PAGE_SIZE, Page, PageRequest};
pub use post::{DEFAULT_AUTHOR, NewPost, Post, PostPatch};
pub use service::{
    ApproachBlock, CaseStudy, Faq, Metric, NewServicePage, PricingTier, ProcessStep,
    ServiceDetail, ServicePage, ServicePatch, ServiceSummary, SubService, TocEntry,
};
