//! Durable store for downloaded image bytes

use std::path::PathBuf;

use super::FileStore;
use crate::constants::{IMAGE_FILE_PREFIX, IMAGE_INDEX_FILENAME};
use crate::error::StorageResult;

const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Persists downloaded image bytes keyed by source URL.
///
/// Stored filenames keep the source extension. Only jpg/jpeg/png are
/// accepted on the disk tier; anything else stays memory/network only.
#[derive(Debug, Clone)]
pub struct ImageStore {
    store: FileStore,
}

impl ImageStore {
    pub async fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let store = FileStore::open(dir, IMAGE_INDEX_FILENAME, IMAGE_FILE_PREFIX).await?;
        Ok(Self { store })
    }

    /// First-write-wins persist of downloaded bytes. URLs without a
    /// supported image extension are skipped.
    pub async fn save(&self, url: &str, bytes: &[u8]) -> StorageResult<()> {
        let Some(ext) =
            url_extension(url).filter(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        else {
            tracing::debug!(url, "unsupported image extension, skipping disk tier");
            return Ok(());
        };

        self.store.save(url, &ext, bytes).await
    }

    /// Load cached bytes for a URL. Misses and unreadable files are `None`.
    pub async fn load(&self, url: &str) -> Option<Vec<u8>> {
        self.store.load(url).await
    }

    pub async fn contains(&self, url: &str) -> bool {
        self.store.contains(url).await
    }

    pub async fn clear(&self, url: &str) -> StorageResult<()> {
        self.store.clear(url).await
    }

    pub async fn clear_all(&self) -> StorageResult<()> {
        self.store.clear_all().await
    }
}

/// Lowercased extension of a URL path, query and fragment stripped.
fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let (stem, ext) = path.rsplit_once('.')?;
    if ext.is_empty() || ext.contains('/') || stem.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
