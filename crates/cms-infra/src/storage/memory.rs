//! In-memory object store - used when Cloudinary is not configured and by
//! tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use cms_core::ports::{ImageUpload, ObjectStore, StorageError, StoredObject, check_format};

use super::default_formats;

/// Keeps uploaded bytes in process memory under `memory://` URLs.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
    allowed_formats: Vec<String>,
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            allowed_formats: default_formats(),
        }
    }
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, public_id: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(public_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn store(&self, upload: ImageUpload) -> Result<StoredObject, StorageError> {
        check_format(&upload, &self.allowed_formats)?;

        let ext = upload.extension().unwrap_or_default();
        let public_id = format!("{}/{}", upload.folder, Uuid::new_v4());
        self.objects
            .write()
            .await
            .insert(public_id.clone(), upload.bytes);

        Ok(StoredObject {
            url: format!("memory://{public_id}.{ext}"),
            public_id,
        })
    }
}
