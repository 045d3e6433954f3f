//! Error types for the cache layer.
//!
//! All errors are propagated via [`StoreError`], which wraps the underlying
//! [`fred`] and [`serde_json`] errors with context about which operation
//! failed. Cache misses are deliberately *not* errors on the resolver path
//! (they surface as `Ok(None)`); [`StoreError::KeyNotFound`] exists only for
//! the typed-get helper, where an absent key means the caller's assumption
//! was wrong.

/// Errors that can occur in the cache layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A cache (Redis-compatible) operation failed.
    #[error("cache error: {0}")]
    Cache(#[from] fred::error::Error),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A key the caller required was not present.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A configuration error (malformed endpoint URL).
    #[error("configuration error: {0}")]
    Config(String),
}
