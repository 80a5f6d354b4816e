//! Durable store for fetched pages

use std::path::PathBuf;

use shared::ProductPage;

use super::FileStore;
use crate::constants::{PAGE_FILE_PREFIX, PAGE_INDEX_FILENAME};
use crate::error::StorageResult;

/// Persists fetched product pages as JSON, keyed by page number.
#[derive(Debug, Clone)]
pub struct PageStore {
    store: FileStore,
}

impl PageStore {
    pub async fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let store = FileStore::open(dir, PAGE_INDEX_FILENAME, PAGE_FILE_PREFIX).await?;
        Ok(Self { store })
    }

    /// First-write-wins persist of a fetched page.
    pub async fn save(&self, page_key: &str, page: &ProductPage) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(page)?;
        self.store.save(page_key, "json", &bytes).await
    }

    /// Load a cached page. A missing or corrupt payload is a miss.
    pub async fn load(&self, page_key: &str) -> Option<ProductPage> {
        let bytes = self.store.load(page_key).await?;
        match serde_json::from_slice(&bytes) {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::warn!(page_key, error = %e, "corrupt cached page, treating as miss");
                None
            }
        }
    }

    pub async fn contains(&self, page_key: &str) -> bool {
        self.store.contains(page_key).await
    }

    pub async fn clear(&self, page_key: &str) -> StorageResult<()> {
        self.store.clear(page_key).await
    }

    pub async fn clear_all(&self) -> StorageResult<()> {
        self.store.clear_all().await
    }
}
