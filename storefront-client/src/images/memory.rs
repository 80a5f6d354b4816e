//! In-process decoded-image cache, the fastest tier

use std::collections::HashMap;
use std::sync::Arc;

use image::DynamicImage;
use tokio::sync::RwLock;

/// URL to decoded-image map shared across callers. Cloning shares state.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageCache {
    inner: Arc<RwLock<HashMap<String, Arc<DynamicImage>>>>,
}

impl MemoryImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, url: &str) -> Option<Arc<DynamicImage>> {
        self.inner.read().await.get(url).cloned()
    }

    pub async fn insert(&self, url: impl Into<String>, image: Arc<DynamicImage>) {
        self.inner.write().await.insert(url.into(), image);
    }

    pub async fn remove(&self, url: &str) {
        self.inner.write().await.remove(url);
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Arc<DynamicImage> {
        Arc::new(DynamicImage::ImageRgba8(image::RgbaImage::new(2, 2)))
    }

    #[tokio::test]
    async fn insert_get_remove() {
        let cache = MemoryImageCache::new();
        let url = "https://img.example.com/cat.png";

        assert!(cache.get(url).await.is_none());

        cache.insert(url, sample()).await;
        assert!(cache.get(url).await.is_some());
        assert_eq!(cache.len().await, 1);

        cache.remove(url).await;
        assert!(cache.get(url).await.is_none());
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache = MemoryImageCache::new();
        cache.insert("a", sample()).await;
        cache.insert("b", sample()).await;

        cache.clear().await;

        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let cache = MemoryImageCache::new();
        let other = cache.clone();

        cache.insert("a", sample()).await;
        assert!(other.get("a").await.is_some());
    }
}
