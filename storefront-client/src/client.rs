//! Top-level client facade

use std::sync::Arc;

use image::DynamicImage;
use shared::ProductItem;

use crate::api::ProductsApi;
use crate::catalog::ProductCatalog;
use crate::config::Config;
use crate::error::{ConfigError, FetchResult, StorageResult};
use crate::images::{ImageLoader, MemoryImageCache};
use crate::ledger::FetchLedger;
use crate::paginator::Paginator;
use crate::store::{ImageStore, PageStore};

/// Entry point owning every service: catalog, fetch ledger, page and image
/// stores, memory cache, and the HTTP clients.
///
/// Construct one per application context and hand clones to consumers;
/// clones share state. There are no process-wide singletons.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    catalog: ProductCatalog,
    ledger: FetchLedger,
    pages: PageStore,
    paginator: Paginator,
    images: ImageLoader,
}

impl StorefrontClient {
    /// Build a client from validated configuration, opening both stores
    /// under `config.data_dir`.
    pub async fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let pages = PageStore::open(config.data_dir.join("pages")).await?;
        let image_store = ImageStore::open(config.data_dir.join("images")).await?;

        let catalog = ProductCatalog::new();
        let ledger = FetchLedger::new(config.retry);
        let api = ProductsApi::new(&config);
        let paginator = Paginator::new(catalog.clone(), ledger.clone(), pages.clone(), api);
        let images = ImageLoader::new(MemoryImageCache::new(), image_store, config.timeout);

        tracing::info!(data_dir = %config.data_dir.display(), "storefront client ready");

        Ok(Self {
            catalog,
            ledger,
            pages,
            paginator,
            images,
        })
    }

    /// Fetch and merge the next product page. See
    /// [`Paginator::fetch_next_page`].
    pub async fn fetch_next_page(&self) -> FetchResult<Vec<ProductItem>> {
        self.paginator.fetch_next_page().await
    }

    /// Whether another page is worth requesting.
    pub async fn is_more_available(&self) -> bool {
        self.catalog.is_more_available().await
    }

    /// Snapshot of the accumulated catalog, in fetch order.
    pub async fn current_items(&self) -> Vec<ProductItem> {
        self.catalog.items().await
    }

    /// Resolve an image through the memory, disk, and network tiers.
    pub async fn load_image(&self, url: &str) -> Option<Arc<DynamicImage>> {
        self.images.load(url).await
    }

    /// Release a page key so the next fetch for it may hit the network
    /// again.
    pub async fn allow_refetch(&self, page_number: u32) {
        self.ledger.mark_retryable(&page_number.to_string()).await;
    }

    /// Drop a single image from both cache tiers.
    pub async fn evict_image(&self, url: &str) -> StorageResult<()> {
        self.images.evict(url).await
    }

    /// Full invalidation: catalog, fetch ledger, both disk stores, and the
    /// memory image cache. Pagination starts over from page one.
    pub async fn reset(&self) -> StorageResult<()> {
        self.catalog.reset().await;
        self.ledger.reset_all().await;
        self.pages.clear_all().await?;
        self.images.clear().await
    }
}
