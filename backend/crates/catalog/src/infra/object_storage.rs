//! HTTP Object Storage Adapter
//!
//! Deletes product images from the external object storage service. The
//! stored value is the public URL; the object key is its last path segment
//! under the bucket's `images/` prefix.

use reqwest::{Client, StatusCode};

use crate::domain::ImageStore;
use crate::error::{CatalogError, CatalogResult};

/// Object storage endpoint configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Base URL of the storage service, e.g. `https://xyz.supabase.co/storage/v1`
    pub base_url: String,
    /// Service API key, sent as bearer token
    pub api_key: Option<String>,
    /// Bucket holding product images
    pub bucket: String,
}

impl StorageConfig {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            bucket: "products".to_string(),
        }
    }
}

/// [`ImageStore`] talking to the storage service over HTTP
#[derive(Clone)]
pub struct HttpImageStore {
    client: Client,
    config: StorageConfig,
}

impl HttpImageStore {
    pub fn new(client: Client, config: StorageConfig) -> Self {
        Self { client, config }
    }

    /// Derive the object key from a stored public URL
    fn object_key(image_url: &str) -> Option<String> {
        let file_name = image_url.trim_end_matches('/').rsplit('/').next()?;
        if file_name.is_empty() {
            return None;
        }
        Some(format!("images/{file_name}"))
    }
}

impl ImageStore for HttpImageStore {
    async fn delete_image(&self, image_url: &str) -> CatalogResult<()> {
        let Some(key) = Self::object_key(image_url) else {
            return Err(CatalogError::Storage(format!(
                "Unparseable image URL: {image_url}"
            )));
        };

        let url = format!(
            "{}/object/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.bucket,
            key
        );

        let mut request = self.client.delete(&url);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key).header("apikey", api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| CatalogError::Storage(err.to_string()))?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            // Already gone counts as deleted
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(CatalogError::Storage(
            platform::http::error_message_from_body(&body),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_from_public_url() {
        assert_eq!(
            HttpImageStore::object_key(
                "https://xyz.supabase.co/storage/v1/object/public/products/images/lamp.png"
            ),
            Some("images/lamp.png".to_string())
        );
        assert_eq!(
            HttpImageStore::object_key("https://cdn.example.com/a/b/c.jpg"),
            Some("images/c.jpg".to_string())
        );
    }

    #[test]
    fn test_object_key_rejects_empty() {
        assert_eq!(HttpImageStore::object_key(""), None);
        assert_eq!(HttpImageStore::object_key("///"), None);
    }
}
