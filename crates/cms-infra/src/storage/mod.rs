//! Object storage implementations for uploaded images.

mod memory;

#[cfg(feature = "cloudinary")]
mod cloudinary;

pub use memory::InMemoryObjectStore;

#[cfg(feature = "cloudinary")]
pub use cloudinary::CloudinaryStore;

use std::time::Duration;

use cms_core::ports::DEFAULT_IMAGE_FORMATS;

/// Cloudinary account settings. All three credentials are required.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Lowercase file extensions accepted for upload.
    pub allowed_formats: Vec<String>,
    pub timeout: Duration,
}

impl CloudinaryConfig {
    /// `None` unless every credential is present and non-blank.
    pub fn from_parts(
        cloud_name: Option<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Some(Self {
            cloud_name: present(cloud_name)?,
            api_key: present(api_key)?,
            api_secret: present(api_secret)?,
            allowed_formats: default_formats(),
            timeout: Duration::from_secs(30),
        })
    }

    pub fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        )
    }
}

pub(crate) fn default_formats() -> Vec<String> {
    DEFAULT_IMAGE_FORMATS.iter().map(|f| f.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_every_credential() {
        let some = |s: &str| Some(s.to_string());

        assert!(CloudinaryConfig::from_parts(some("demo"), some("key"), some("secret")).is_some());
        assert!(CloudinaryConfig::from_parts(some("demo"), None, some("secret")).is_none());
        assert!(CloudinaryConfig::from_parts(some("demo"), some("key"), some("  ")).is_none());
    }

    #[test]
    fn upload_endpoint_is_per_cloud() {
        let config =
            CloudinaryConfig::from_parts(Some("demo".into()), Some("k".into()), Some("s".into()))
                .unwrap();

        assert_eq!(
            config.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
        assert_eq!(config.allowed_formats, vec!["jpg", "png", "jpeg"]);
    }
}
