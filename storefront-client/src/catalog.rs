//! Ordered, deduplicated product accumulation

use std::collections::HashSet;
use std::sync::Arc;

use shared::{ProductItem, ProductPage};
use tokio::sync::RwLock;

use crate::constants::FIRST_PAGE_NUMBER;

/// In-memory catalog of fetched products.
///
/// Items keep fetch-completion order; appends skip ids that are already
/// present. `last_page` holds the envelope of the most recent accepted
/// network page and drives the more-data-available predicate. Cloning the
/// catalog shares state.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    inner: Arc<RwLock<CatalogInner>>,
}

#[derive(Debug, Default)]
struct CatalogInner {
    items: Vec<ProductItem>,
    seen_ids: HashSet<String>,
    last_page: Option<ProductPage>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append items in order, skipping ids already present.
    pub async fn append(&self, items: Vec<ProductItem>) {
        if items.is_empty() {
            return;
        }

        let mut inner = self.inner.write().await;
        for item in items {
            if inner.seen_ids.insert(item.id.clone()) {
                inner.items.push(item);
            }
        }
    }

    /// Whether another page is worth requesting.
    ///
    /// A short page (fewer items returned than requested) ends pagination
    /// even when the reported total says otherwise: the data is trusted
    /// over the metadata.
    pub async fn is_more_available(&self) -> bool {
        let inner = self.inner.read().await;
        match &inner.last_page {
            Some(last) => {
                let exhausted = inner.items.len() as u32 >= last.total_products
                    || last.products.len() as u32 != last.page_size;
                !exhausted
            }
            None => true,
        }
    }

    /// Record number the next fetch should start at.
    ///
    /// Derived from the accumulated item count, which is why the page size
    /// must stay constant across a session.
    pub async fn next_page_number(&self) -> u32 {
        FIRST_PAGE_NUMBER + self.inner.read().await.items.len() as u32
    }

    /// Record the envelope of an accepted network page.
    pub async fn set_last_page(&self, page: ProductPage) {
        self.inner.write().await.last_page = Some(page);
    }

    pub async fn last_page(&self) -> Option<ProductPage> {
        self.inner.read().await.last_page.clone()
    }

    /// Snapshot of the accumulated items.
    pub async fn items(&self) -> Vec<ProductItem> {
        self.inner.read().await.items.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.items.is_empty()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.inner.read().await.seen_ids.contains(id)
    }

    /// Drop all items and the last page envelope in one critical section.
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        inner.items.clear();
        inner.seen_ids.clear();
        inner.last_page = None;
    }
}
