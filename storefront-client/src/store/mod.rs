//! Durable key-to-blob stores with a filename-mapping index
//!
//! Each store keeps an in-memory `key -> filename` index mirrored to a
//! single JSON index file, one blob file per entry, and a monotonic
//! file-id counter that survives restarts. An index entry is committed
//! only after its blob write succeeds; on eviction the index entry is
//! removed and persisted before the blob is deleted, so a crash can leave
//! an orphaned blob but never a dangling index entry.

mod image_store;
mod page_store;

pub use image_store::ImageStore;
pub use page_store::PageStore;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::constants::FILE_ID_SEED;
use crate::error::StorageResult;

/// Serialized form of a store index.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreIndex {
    next_file_id: u64,
    entries: HashMap<String, String>,
}

impl Default for StoreIndex {
    fn default() -> Self {
        Self {
            next_file_id: FILE_ID_SEED,
            entries: HashMap::new(),
        }
    }
}

/// Shared index + blob layer under [`PageStore`] and [`ImageStore`].
///
/// The index mutex is only held for in-memory work; file I/O happens
/// outside it. Index file writes are serialized through a dedicated writer
/// lock, with the snapshot taken inside that critical section so a slow
/// writer cannot clobber a newer index state.
#[derive(Debug, Clone)]
pub(crate) struct FileStore {
    inner: Arc<Mutex<StoreIndex>>,
    writer: Arc<Mutex<()>>,
    dir: PathBuf,
    index_path: PathBuf,
    prefix: &'static str,
}

impl FileStore {
    /// Open a store rooted at `dir`, loading any existing index. An
    /// unreadable or corrupt index file starts the store empty instead of
    /// failing the open.
    pub(crate) async fn open(
        dir: impl Into<PathBuf>,
        index_filename: &str,
        prefix: &'static str,
    ) -> StorageResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let index_path = dir.join(index_filename);
        let index = match tokio::fs::read(&index_path).await {
            Ok(bytes) => match serde_json::from_slice::<StoreIndex>(&bytes) {
                Ok(index) => index,
                Err(e) => {
                    tracing::warn!(
                        path = %index_path.display(),
                        error = %e,
                        "corrupt store index, starting empty"
                    );
                    StoreIndex::default()
                }
            },
            Err(_) => StoreIndex::default(),
        };

        tracing::debug!(
            dir = %dir.display(),
            entries = index.entries.len(),
            "store opened"
        );

        Ok(Self {
            inner: Arc::new(Mutex::new(index)),
            writer: Arc::new(Mutex::new(())),
            dir,
            index_path,
            prefix,
        })
    }

    /// First-write-wins save. A key already present in the index is left
    /// untouched; otherwise the blob is written first and the index entry
    /// committed after, so a failed blob write never updates the index.
    pub(crate) async fn save(&self, key: &str, ext: &str, bytes: &[u8]) -> StorageResult<()> {
        let filename = {
            let mut index = self.inner.lock().await;
            if index.entries.contains_key(key) {
                return Ok(());
            }
            let id = index.next_file_id;
            index.next_file_id += 1;
            format!("{}-{}.{}", self.prefix, id, ext)
        };

        let blob_path = self.dir.join(&filename);
        tokio::fs::write(&blob_path, bytes).await?;

        {
            let mut index = self.inner.lock().await;
            if index.entries.contains_key(key) {
                // lost a same-key race after the blob write; first write wins
                drop(index);
                let _ = tokio::fs::remove_file(&blob_path).await;
                return Ok(());
            }
            index.entries.insert(key.to_string(), filename);
        }

        self.persist_index().await
    }

    /// Load the blob for a key. An index miss or an unreadable blob file
    /// is a `None`; nothing escapes as an error.
    pub(crate) async fn load(&self, key: &str) -> Option<Vec<u8>> {
        let filename = self.inner.lock().await.entries.get(key).cloned()?;
        let path = self.dir.join(&filename);

        match tokio::fs::read(&path).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(
                    key,
                    path = %path.display(),
                    error = %e,
                    "cache blob unreadable, treating as miss"
                );
                None
            }
        }
    }

    /// Remove a key. The index entry is removed and persisted first; a
    /// blob deletion failure afterwards leaves an orphaned file, not a
    /// corrupt index.
    pub(crate) async fn clear(&self, key: &str) -> StorageResult<()> {
        let filename = {
            let mut index = self.inner.lock().await;
            match index.entries.remove(key) {
                Some(filename) => filename,
                None => return Ok(()),
            }
        };

        self.persist_index().await?;

        let path = self.dir.join(&filename);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(
                key,
                path = %path.display(),
                error = %e,
                "orphaned cache blob left behind"
            );
        }
        Ok(())
    }

    /// Drop every index entry and persist the empty index. Existing blob
    /// files are not enumerated; the file-id counter is preserved.
    pub(crate) async fn clear_all(&self) -> StorageResult<()> {
        self.inner.lock().await.entries.clear();
        self.persist_index().await
    }

    pub(crate) async fn contains(&self, key: &str) -> bool {
        self.inner.lock().await.entries.contains_key(key)
    }

    pub(crate) async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    async fn persist_index(&self) -> StorageResult<()> {
        let _guard = self.writer.lock().await;
        let bytes = {
            let index = self.inner.lock().await;
            serde_json::to_vec_pretty(&*index)?
        };
        tokio::fs::write(&self.index_path, bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn open(dir: &std::path::Path) -> FileStore {
        FileStore::open(dir, "index.json", "blob").await.unwrap()
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = open(dir.path()).await;

        store.save("key-1", "bin", b"payload").await.unwrap();

        assert_eq!(store.load("key-1").await.unwrap(), b"payload");
        assert!(store.load("key-2").await.is_none());
    }

    #[tokio::test]
    async fn second_save_for_a_key_is_ignored() {
        let dir = tempdir().unwrap();
        let store = open(dir.path()).await;

        store.save("key-1", "bin", b"first").await.unwrap();
        store.save("key-1", "bin", b"second").await.unwrap();

        assert_eq!(store.load("key-1").await.unwrap(), b"first");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn filenames_use_the_seeded_counter() {
        let dir = tempdir().unwrap();
        let store = open(dir.path()).await;

        store.save("a", "bin", b"a").await.unwrap();
        store.save("b", "bin", b"b").await.unwrap();

        assert!(dir.path().join("blob-100.bin").exists());
        assert!(dir.path().join("blob-101.bin").exists());
    }

    #[tokio::test]
    async fn index_and_counter_survive_reopen() {
        let dir = tempdir().unwrap();

        {
            let store = open(dir.path()).await;
            store.save("a", "bin", b"a").await.unwrap();
        }

        let store = open(dir.path()).await;
        assert_eq!(store.load("a").await.unwrap(), b"a");

        store.save("b", "bin", b"b").await.unwrap();
        assert!(dir.path().join("blob-101.bin").exists());
    }

    #[tokio::test]
    async fn clear_removes_entry_and_blob() {
        let dir = tempdir().unwrap();
        let store = open(dir.path()).await;

        store.save("a", "bin", b"a").await.unwrap();
        store.clear("a").await.unwrap();

        assert!(store.load("a").await.is_none());
        assert!(!dir.path().join("blob-100.bin").exists());

        // clearing an absent key succeeds
        store.clear("a").await.unwrap();
    }

    #[tokio::test]
    async fn cleared_key_accepts_a_new_write() {
        let dir = tempdir().unwrap();
        let store = open(dir.path()).await;

        store.save("a", "bin", b"old").await.unwrap();
        store.clear("a").await.unwrap();
        store.save("a", "bin", b"new").await.unwrap();

        assert_eq!(store.load("a").await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn clear_all_empties_index_without_touching_blobs() {
        let dir = tempdir().unwrap();
        let store = open(dir.path()).await;

        store.save("a", "bin", b"a").await.unwrap();
        store.save("b", "bin", b"b").await.unwrap();

        store.clear_all().await.unwrap();

        assert_eq!(store.len().await, 0);
        assert!(store.load("a").await.is_none());
        // blobs become orphans, the counter keeps climbing
        assert!(dir.path().join("blob-100.bin").exists());
        store.save("c", "bin", b"c").await.unwrap();
        assert!(dir.path().join("blob-102.bin").exists());
    }

    #[tokio::test]
    async fn deleted_blob_reads_as_miss() {
        let dir = tempdir().unwrap();
        let store = open(dir.path()).await;

        store.save("a", "bin", b"a").await.unwrap();
        tokio::fs::remove_file(dir.path().join("blob-100.bin"))
            .await
            .unwrap();

        assert!(store.load("a").await.is_none());
        // the index still holds the entry; first-write-wins stands
        assert!(store.contains("a").await);
    }

    #[tokio::test]
    async fn corrupt_index_file_starts_empty() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("index.json"), b"{ not json")
            .await
            .unwrap();

        let store = open(dir.path()).await;
        assert_eq!(store.len().await, 0);

        store.save("a", "bin", b"a").await.unwrap();
        assert!(dir.path().join("blob-100.bin").exists());
    }

    #[tokio::test]
    async fn concurrent_saves_of_one_key_keep_the_first_write() {
        let dir = tempdir().unwrap();
        let store = open(dir.path()).await;

        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.save("k", "bin", b"aaaa").await })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.save("k", "bin", b"bbbb").await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(store.len().await, 1);
        let stored = store.load("k").await.unwrap();
        assert!(stored == b"aaaa" || stored == b"bbbb");
    }
}
