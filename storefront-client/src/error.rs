//! Client error types

use thiserror::Error;

use crate::constants::MAX_PAGE_SIZE;

/// Errors surfaced to the pagination caller for a single fetch attempt.
///
/// Each failure is delivered exactly once through the returned result; the
/// engine never retries on its own.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or transport layer failure.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Transport succeeded but the response carried no body.
    #[error("empty response payload")]
    EmptyPayload,

    /// Payload parsed but carried a non-OK embedded status.
    #[error("page rejected with embedded status {0}")]
    BadStatus(u16),

    /// Malformed page payload.
    #[error("malformed page payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for page fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Disk-layer failures.
///
/// Always recovered locally: the engine and the image loader treat them as
/// cache misses, and they never reach the pagination caller.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index serialization error: {0}")]
    Index(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Configuration rejected at client construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("page size {0} outside supported range 1..={MAX_PAGE_SIZE}")]
    PageSizeOutOfRange(u32),

    #[error("base URL must not be empty")]
    EmptyBaseUrl,

    #[error("API key must not be empty")]
    EmptyApiKey,

    #[error("cache directory unusable: {0}")]
    DataDir(#[from] StorageError),
}
