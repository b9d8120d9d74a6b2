//! Image hosting adapter backed by an S3-compatible object store
//!
//! Takes raw image bytes and returns the public URL each one ends up at.
//! All product images are filed under a fixed key prefix. Uploads within a
//! single request run concurrently and the batch is all-or-nothing; a
//! failure after some objects are stored leaves orphans behind, which is
//! accepted (no compensation, no retries).

use aws_sdk_s3::primitives::ByteStream;
use futures::future::try_join_all;
use tracing::{error, info};
use uuid::Uuid;

use crate::{error::ApiError, models::ImageFile};

/// Image store configuration
#[derive(Debug, Clone)]
pub struct ImageStoreConfig {
    /// Bucket the images land in
    pub bucket: String,
    /// Logical folder all product images are filed under
    pub key_prefix: String,
    /// Base URL the bucket is publicly served from
    pub public_base_url: String,
}

impl ImageStoreConfig {
    /// Create a new ImageStoreConfig from environment variables
    ///
    /// # Environment Variables
    /// - `MEDIA_BUCKET_NAME`: bucket name (default: "product-hub-media")
    /// - `MEDIA_KEY_PREFIX`: key prefix (default: "products")
    /// - `MEDIA_PUBLIC_URL`: public base URL (default: the bucket's
    ///   s3.amazonaws.com address)
    pub fn from_env() -> Self {
        let bucket =
            std::env::var("MEDIA_BUCKET_NAME").unwrap_or_else(|_| "product-hub-media".to_string());
        let key_prefix =
            std::env::var("MEDIA_KEY_PREFIX").unwrap_or_else(|_| "products".to_string());
        let public_base_url = std::env::var("MEDIA_PUBLIC_URL")
            .unwrap_or_else(|_| format!("https://{bucket}.s3.amazonaws.com"));

        Self {
            bucket,
            key_prefix,
            public_base_url,
        }
    }
}

/// Image store client
#[derive(Clone)]
pub struct ImageStore {
    client: aws_sdk_s3::Client,
    config: ImageStoreConfig,
}

impl ImageStore {
    /// Create a new image store
    pub fn new(client: aws_sdk_s3::Client, config: ImageStoreConfig) -> Self {
        Self { client, config }
    }

    /// Initialize the store from the ambient AWS configuration
    pub async fn from_env() -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = aws_sdk_s3::Client::new(&aws_config);

        Self::new(client, ImageStoreConfig::from_env())
    }

    /// Upload a single image; one attempt, no retry
    pub async fn upload(&self, image: &ImageFile) -> Result<String, ApiError> {
        let key = object_key(&self.config, image.content_type.as_deref());

        let mut request = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .body(ByteStream::from(image.bytes.clone()));
        if let Some(content_type) = &image.content_type {
            request = request.content_type(content_type);
        }

        request.send().await.map_err(|e| {
            error!("Failed to upload image to {}: {}", self.config.bucket, e);
            ApiError::Upload(e.to_string())
        })?;

        Ok(public_url(&self.config, &key))
    }

    /// Upload a batch of images concurrently
    ///
    /// The returned URLs match the input order. Any single failure fails
    /// the whole batch; no partial success is surfaced to the caller.
    pub async fn upload_all(&self, images: &[ImageFile]) -> Result<Vec<String>, ApiError> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let urls = try_join_all(images.iter().map(|image| self.upload(image))).await?;
        info!("Uploaded {} images to {}", urls.len(), self.config.bucket);

        Ok(urls)
    }
}

fn object_key(config: &ImageStoreConfig, content_type: Option<&str>) -> String {
    let ext = match content_type {
        Some("image/jpeg") => "jpg",
        Some("image/png") => "png",
        Some("image/webp") => "webp",
        Some("image/gif") => "gif",
        _ => "img",
    };

    format!("{}/{}.{}", config.key_prefix, Uuid::new_v4(), ext)
}

fn public_url(config: &ImageStoreConfig, key: &str) -> String {
    format!("{}/{}", config.public_base_url.trim_end_matches('/'), key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ImageStoreConfig {
        ImageStoreConfig {
            bucket: "product-hub-media".to_string(),
            key_prefix: "products".to_string(),
            public_base_url: "https://cdn.example.com/".to_string(),
        }
    }

    #[test]
    fn test_object_key_uses_prefix_and_content_type() {
        let config = test_config();

        let key = object_key(&config, Some("image/png"));
        assert!(key.starts_with("products/"));
        assert!(key.ends_with(".png"));

        let key = object_key(&config, None);
        assert!(key.ends_with(".img"));
    }

    #[test]
    fn test_object_keys_are_unique() {
        let config = test_config();
        let a = object_key(&config, Some("image/jpeg"));
        let b = object_key(&config, Some("image/jpeg"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_public_url_joins_cleanly() {
        let config = test_config();
        let url = public_url(&config, "products/abc.jpg");
        assert_eq!(url, "https://cdn.example.com/products/abc.jpg");
    }
}
