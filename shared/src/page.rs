//! Paginated page envelope

use serde::{Deserialize, Serialize};

use crate::ProductItem;

/// One page of the product list as returned by the server.
///
/// `kind` and `etag` are opaque passthrough fields: preserved for
/// round-trip fidelity, never interpreted. The server keeps
/// `products.len() <= page_size`; a page shorter than requested signals
/// that the list is exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub id: String,
    pub products: Vec<ProductItem>,
    /// Server-reported total across all pages.
    pub total_products: u32,
    /// 1-based record number this page starts at.
    pub page_number: u32,
    /// Items requested for this page.
    pub page_size: u32,
    /// HTTP-style status embedded in the payload; 200 means accepted.
    pub status: u16,
    pub kind: String,
    pub etag: String,
}
