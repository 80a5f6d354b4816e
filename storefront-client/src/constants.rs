//! Wire and store constants

/// Largest page size the server will honor.
pub const MAX_PAGE_SIZE: u32 = 30;

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Record number a fresh catalog starts fetching at.
pub const FIRST_PAGE_NUMBER: u32 = 1;

/// Payload-embedded status of an accepted page.
pub const STATUS_OK: u16 = 200;

/// First file id handed out by a fresh store index.
pub const FILE_ID_SEED: u64 = 100;

pub(crate) const PAGE_FILE_PREFIX: &str = "page";
pub(crate) const IMAGE_FILE_PREFIX: &str = "image";

pub(crate) const PAGE_INDEX_FILENAME: &str = "pages-index.json";
pub(crate) const IMAGE_INDEX_FILENAME: &str = "images-index.json";
