//! Cache-aside image fetching

use std::sync::Arc;
use std::time::Duration;

use image::DynamicImage;
use reqwest::Client;

use crate::error::StorageResult;
use crate::images::MemoryImageCache;
use crate::store::ImageStore;

/// Resolves an image URL through memory, then disk, then network,
/// populating the faster tiers on the way back.
///
/// A load that exhausts all three tiers yields `None`, never an error. The
/// disk write after a network hit is fire-and-forget: its outcome does not
/// affect the returned image.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    memory: MemoryImageCache,
    disk: ImageStore,
    client: Client,
}

impl ImageLoader {
    pub fn new(memory: MemoryImageCache, disk: ImageStore, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            memory,
            disk,
            client,
        }
    }

    /// Resolve one image URL.
    pub async fn load(&self, url: &str) -> Option<Arc<DynamicImage>> {
        if let Some(image) = self.memory.get(url).await {
            return Some(image);
        }

        if let Some(bytes) = self.disk.load(url).await {
            match image::load_from_memory(&bytes) {
                Ok(decoded) => {
                    tracing::debug!(url, "image served from disk cache");
                    let image = Arc::new(decoded);
                    self.memory.insert(url, image.clone()).await;
                    return Some(image);
                }
                Err(e) => {
                    tracing::warn!(url, error = %e, "cached image bytes failed to decode, refetching");
                }
            }
        }

        self.fetch_remote(url).await
    }

    async fn fetch_remote(&self, url: &str) -> Option<Arc<DynamicImage>> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url, error = %e, "image download failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                url,
                status = %response.status(),
                "image download returned non-success status"
            );
            return None;
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(url, error = %e, "failed to read image response body");
                return None;
            }
        };

        let decoded = match image::load_from_memory(&bytes) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(url, error = %e, "downloaded image failed to decode");
                return None;
            }
        };

        let image = Arc::new(decoded);
        self.memory.insert(url, image.clone()).await;

        // disk tier is best-effort and must not delay the caller
        let disk = self.disk.clone();
        let url = url.to_string();
        tokio::spawn(async move {
            if let Err(e) = disk.save(&url, &bytes).await {
                tracing::warn!(url, error = %e, "image disk save failed");
            }
        });

        Some(image)
    }

    /// Drop a single URL from both cache tiers.
    pub async fn evict(&self, url: &str) -> StorageResult<()> {
        self.memory.remove(url).await;
        self.disk.clear(url).await
    }

    /// Drop every cached image from both tiers.
    pub async fn clear(&self) -> StorageResult<()> {
        self.memory.clear().await;
        self.disk.clear_all().await
    }

    pub fn memory(&self) -> &MemoryImageCache {
        &self.memory
    }
}
