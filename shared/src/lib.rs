//! Shared types for the storefront client
//!
//! Wire models used by the catalog client and the presentation layer:
//! the product item and the paginated page envelope.

pub mod page;
pub mod product;

pub use page::ProductPage;
pub use product::ProductItem;
