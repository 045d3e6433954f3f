//! Cache (Redis-compatible) connection handling.
//!
//! Publishing is a side channel: a run must succeed even when no cache is
//! reachable. Candidate endpoints are therefore tried in a fixed fallback
//! order -- explicit override, then the named primary host, then loopback --
//! and each one must answer a PING probe before it is used. When every
//! candidate fails, the caller gets [`None`] and skips publishing.

use fred::prelude::*;

use seroline_types::TimeSeries;

use crate::error::StoreError;

/// Environment variable naming an explicit override endpoint.
pub const CACHE_URL_ENV: &str = "SEROLINE_CACHE_URL";

/// Default named-host endpoint (container networking).
pub const DEFAULT_PRIMARY_URL: &str = "redis://redis:6379";

/// Default loopback endpoint (local development).
pub const DEFAULT_LOOPBACK_URL: &str = "redis://127.0.0.1:6379";

/// Ordered candidate endpoints for the cache store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEndpoints {
    /// Explicit override, tried first when present.
    pub override_url: Option<String>,
    /// Named primary host, tried second.
    pub primary_url: String,
    /// Loopback host, tried last.
    pub loopback_url: String,
}

impl CacheEndpoints {
    /// Build the candidate list with an optional override in front of the
    /// default primary and loopback endpoints.
    pub fn new(override_url: Option<String>) -> Self {
        Self {
            override_url,
            primary_url: DEFAULT_PRIMARY_URL.to_owned(),
            loopback_url: DEFAULT_LOOPBACK_URL.to_owned(),
        }
    }

    /// Build the candidate list, reading the override from
    /// [`CACHE_URL_ENV`] when set.
    pub fn from_env() -> Self {
        Self::new(std::env::var(CACHE_URL_ENV).ok())
    }

    /// Candidate URLs in probe order.
    pub fn candidates(&self) -> Vec<&str> {
        let mut urls = Vec::with_capacity(3);
        if let Some(url) = &self.override_url {
            urls.push(url.as_str());
        }
        urls.push(self.primary_url.as_str());
        urls.push(self.loopback_url.as_str());
        urls
    }
}

impl Default for CacheEndpoints {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Connection handle to a Redis-compatible cache instance.
///
/// Wraps a [`fred::prelude::Client`] and provides the three operations the
/// timeline pipeline needs: PING (liveness probe), GET, and SET.
#[derive(Clone)]
pub struct CachePool {
    client: Client,
}

impl CachePool {
    /// Connect to the cache at the given URL and verify it with a PING.
    ///
    /// The URL follows the Redis URL scheme: `redis://host:port` or
    /// `redis://host:port/db`. No reconnect policy is configured; a dead
    /// endpoint fails the probe instead of retrying forever.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the URL cannot be parsed.
    /// Returns [`StoreError::Cache`] if the connection or the probe fails.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let config = Config::from_url(url)
            .map_err(|e| StoreError::Config(format!("invalid cache URL {url}: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        if let Err(err) = client.ping::<String>(None).await {
            client.quit().await.ok();
            return Err(StoreError::Cache(err));
        }

        tracing::info!(url, "connected to cache");
        Ok(Self { client })
    }

    /// Try each candidate endpoint in order and keep the first that answers
    /// the liveness probe.
    ///
    /// Returns [`None`] when no endpoint responds; the caller then skips
    /// publishing and the run still completes.
    pub async fn connect_any(endpoints: &CacheEndpoints) -> Option<Self> {
        for url in endpoints.candidates() {
            match Self::connect(url).await {
                Ok(pool) => return Some(pool),
                Err(err) => {
                    tracing::warn!(url, error = %err, "cache endpoint unavailable");
                }
            }
        }
        tracing::warn!("no cache endpoint answered the liveness probe, publishing disabled");
        None
    }

    /// Store `value` at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cache`] if the write fails.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _: () = self.client.set(key, value, None, None, false).await?;
        Ok(())
    }

    /// Read the value at `key`, or [`None`] when the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cache`] if the read fails.
    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value: Option<String> = self.client.get(key).await?;
        Ok(value)
    }

    /// Read the series stored at `key` and decode its wire form.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] if the key does not exist.
    /// Returns [`StoreError::Serialization`] if decoding fails.
    /// Returns [`StoreError::Cache`] if the read fails.
    pub async fn get_series(&self, key: &str) -> Result<TimeSeries, StoreError> {
        let value: Option<String> = self.client.get(key).await?;
        value.map_or_else(
            || Err(StoreError::KeyNotFound(key.to_owned())),
            |raw| Ok(TimeSeries::from_json(&raw)?),
        )
    }

    /// Flush all keys from the cache instance.
    ///
    /// **WARNING:** This deletes all data. Only use for testing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cache`] if the flush fails.
    pub async fn flush_all(&self) -> Result<(), StoreError> {
        let _: () = self.client.flushall(false).await?;
        Ok(())
    }

    /// Return a reference to the underlying [`Client`].
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_without_override_are_primary_then_loopback() {
        let endpoints = CacheEndpoints::default();
        assert_eq!(
            endpoints.candidates(),
            vec![DEFAULT_PRIMARY_URL, DEFAULT_LOOPBACK_URL]
        );
    }

    #[test]
    fn override_endpoint_is_probed_first() {
        let endpoints = CacheEndpoints::new(Some("redis://cache.internal:6400".to_owned()));
        assert_eq!(
            endpoints.candidates(),
            vec![
                "redis://cache.internal:6400",
                DEFAULT_PRIMARY_URL,
                DEFAULT_LOOPBACK_URL
            ]
        );
    }
}
