//! Read-side resolution of published series.
//!
//! Two modes: direct lookup by concrete key, and the two-hop `latest`
//! indirection (pointer key, then the concrete key it names). A miss at
//! either hop is a signal, not an error: both surface as `Ok(None)`.
//! Reads never mutate state.

use seroline_types::Metric;

use crate::cache::CachePool;
use crate::error::StoreError;

/// Fetch a stored series body by its concrete key.
///
/// # Errors
///
/// Returns [`StoreError::Cache`] if the read fails; an absent key is
/// `Ok(None)`.
pub async fn fetch_by_key(pool: &CachePool, key: &str) -> Result<Option<String>, StoreError> {
    pool.get(key).await
}

/// Fetch the newest stored series body for `metric` via its `latest`
/// pointer.
///
/// # Errors
///
/// Returns [`StoreError::Cache`] if either read fails; a miss at either
/// hop is `Ok(None)`.
pub async fn fetch_latest(pool: &CachePool, metric: Metric) -> Result<Option<String>, StoreError> {
    let pointer = metric.latest_key();
    let Some(key) = pool.get(&pointer).await? else {
        tracing::debug!(metric = %metric, pointer, "no latest pointer for metric");
        return Ok(None);
    };

    let value = pool.get(&key).await?;
    if value.is_none() {
        // The pointer named a key that has since disappeared.
        tracing::debug!(metric = %metric, key, "latest pointer is dangling");
    }
    Ok(value)
}
