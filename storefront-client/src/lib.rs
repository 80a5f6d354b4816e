//! Storefront client core
//!
//! Incremental product-list fetching with a two-tier cache: a pagination
//! engine pulls bounded pages from a remote list endpoint, merges them
//! into a stable ordered catalog, persists fetched pages and downloaded
//! images to disk, serves from memory, then disk, then network, and
//! suppresses duplicate in-flight fetches per page.

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod images;
pub mod ledger;
pub mod paginator;
pub mod store;

pub use catalog::ProductCatalog;
pub use client::StorefrontClient;
pub use config::{Config, RetryPolicy};
pub use error::{ConfigError, FetchError, FetchResult, StorageError, StorageResult};
pub use images::{ImageLoader, MemoryImageCache};
pub use ledger::FetchLedger;
pub use paginator::Paginator;
pub use store::{ImageStore, PageStore};

// Re-export shared models for convenience
pub use shared::{ProductItem, ProductPage};
