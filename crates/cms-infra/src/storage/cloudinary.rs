//! Cloudinary signed-upload client.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use cms_core::ports::{ImageUpload, ObjectStore, StorageError, StoredObject, check_format};

use super::CloudinaryConfig;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// Uploads images to Cloudinary and returns their HTTPS delivery URL.
pub struct CloudinaryStore {
    client: Client,
    config: CloudinaryConfig,
}

impl CloudinaryStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StorageError::Upstream(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Signed parameters, sorted by name as the signature requires.
    fn signed_params(&self, folder: &str, timestamp: i64) -> Vec<(&'static str, String)> {
        vec![
            ("allowed_formats", self.config.allowed_formats.join(",")),
            ("folder", folder.to_string()),
            ("timestamp", timestamp.to_string()),
        ]
    }
}

/// SHA-1 over `k1=v1&k2=v2...` followed by the API secret, hex encoded.
pub(crate) fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let joined = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{:x}", Sha1::digest(format!("{joined}{api_secret}").as_bytes()))
}

#[async_trait]
impl ObjectStore for CloudinaryStore {
    async fn store(&self, upload: ImageUpload) -> Result<StoredObject, StorageError> {
        check_format(&upload, &self.config.allowed_formats)?;

        let params = self.signed_params(&upload.folder, Utc::now().timestamp());
        let signature = sign(&params, &self.config.api_secret);

        let mut file = Part::bytes(upload.bytes).file_name(upload.file_name.clone());
        if let Some(content_type) = &upload.content_type {
            file = file
                .mime_str(content_type)
                .map_err(|e| StorageError::Upstream(e.to_string()))?;
        }

        let mut form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }

        tracing::debug!(folder = %upload.folder, file = %upload.file_name, "Uploading image");

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    StorageError::Upstream("Upload timed out".to_string())
                } else {
                    StorageError::Upstream(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Upstream(format!("HTTP {status}: {body}")));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::Upstream(e.to_string()))?;

        tracing::info!(public_id = %uploaded.public_id, "Image uploaded");
        Ok(StoredObject {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }
}
