//! Object storage port for uploaded images.

use async_trait::async_trait;

/// Extensions accepted when a store is not configured otherwise.
pub const DEFAULT_IMAGE_FORMATS: &[&str] = &["jpg", "png", "jpeg"];

/// An image received from a client, ready to be stored.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Logical folder, one per resource kind (`blogs`, `services`).
    pub folder: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Lowercased extension of the original file name.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// Where a stored object can be fetched from.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub url: String,
    pub public_id: String,
}

/// Object store trait - "store bytes, return a public URL".
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn store(&self, upload: ImageUpload) -> Result<StoredObject, StorageError>;
}

/// Reject uploads whose extension is not in `allowed`.
pub fn check_format(upload: &ImageUpload, allowed: &[String]) -> Result<(), StorageError> {
    match upload.extension() {
        Some(ext) if allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext)) => Ok(()),
        other => Err(StorageError::UnsupportedFormat(other.unwrap_or_default())),
    }
}

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Unsupported image format: {0:?}")]
    UnsupportedFormat(String),

    #[error("Upload failed: {0}")]
    Upstream(String),

    #[error("Object storage is not configured")]
    NotConfigured,
}
