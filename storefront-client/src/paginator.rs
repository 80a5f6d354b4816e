//! Incremental page fetching over the catalog, disk cache, and network

use std::collections::HashSet;

use shared::ProductItem;

use crate::api::ProductsApi;
use crate::catalog::ProductCatalog;
use crate::constants::STATUS_OK;
use crate::error::{FetchError, FetchResult};
use crate::ledger::FetchLedger;
use crate::store::PageStore;

/// Orchestrates one "give me more" step: exhaustion check, disk cache,
/// in-flight dedup, network fetch, validation, merge, persist.
///
/// Callers may invoke [`fetch_next_page`](Self::fetch_next_page)
/// concurrently (scroll-driven prefetch triggers do); the ledger admits at
/// most one network fetch per page key, and losers complete immediately
/// with an empty, error-free result.
#[derive(Debug, Clone)]
pub struct Paginator {
    catalog: ProductCatalog,
    ledger: FetchLedger,
    pages: PageStore,
    api: ProductsApi,
}

impl Paginator {
    pub fn new(
        catalog: ProductCatalog,
        ledger: FetchLedger,
        pages: PageStore,
        api: ProductsApi,
    ) -> Self {
        Self {
            catalog,
            ledger,
            pages,
            api,
        }
    }

    /// Fetch the next page of products and merge it into the catalog.
    ///
    /// Completes with an empty list and no error when the catalog is
    /// already complete or the page is claimed by another fetch. Transport,
    /// decode, and payload-status failures surface once through the
    /// returned error; the page key stays claimed afterwards, so whether a
    /// later call retries is governed by the configured retry policy.
    pub async fn fetch_next_page(&self) -> FetchResult<Vec<ProductItem>> {
        if !self.catalog.is_more_available().await {
            tracing::debug!("catalog complete, skipping fetch");
            return Ok(Vec::new());
        }

        let page_number = self.catalog.next_page_number().await;
        let page_key = page_number.to_string();

        // disk tier: no network call, no ledger claim
        if let Some(cached) = self.pages.load(&page_key).await {
            tracing::debug!(
                page_number,
                items = cached.products.len(),
                "serving page from disk cache"
            );
            let items = cached.products;
            self.catalog.append(items.clone()).await;
            return Ok(items);
        }

        if !self.ledger.try_begin(&page_key).await {
            tracing::debug!(page_number, "page already claimed, skipping fetch");
            return Ok(Vec::new());
        }

        let page = self.api.fetch_page(page_number).await?;

        if page.status != STATUS_OK {
            tracing::warn!(page_number, status = page.status, "page rejected");
            return Err(FetchError::BadStatus(page.status));
        }

        self.catalog.set_last_page(page.clone()).await;

        if let Err(e) = self.pages.save(&page_key, &page).await {
            tracing::warn!(page_number, error = %e, "page persist failed, continuing without disk copy");
        }

        self.log_duplicates(&page.products).await;

        let items = page.products;
        self.catalog.append(items.clone()).await;

        tracing::debug!(
            page_number,
            new_items = items.len(),
            total = self.catalog.len().await,
            "page merged"
        );
        Ok(items)
    }

    // Diagnostic only: the catalog append is the authoritative dedup.
    async fn log_duplicates(&self, incoming: &[ProductItem]) {
        let mut seen = HashSet::new();
        for item in incoming {
            if !seen.insert(item.id.as_str()) {
                tracing::warn!(id = %item.id, "duplicate item within one server page");
            } else if self.catalog.contains(&item.id).await {
                tracing::warn!(id = %item.id, "server item already present in catalog");
            }
        }
    }
}
