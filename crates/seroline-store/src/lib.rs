//! Cache client for the seroline timeline pipeline.
//!
//! A completed run hands its four timelines to this crate, which writes
//! them to a Redis-compatible keyed cache and maintains a `latest` pointer
//! per metric so clients can always find the newest run. The cache is a
//! side channel: when no endpoint answers the liveness probe, publishing is
//! skipped and the run still succeeds.
//!
//! # Key Patterns
//!
//! | Pattern | Description |
//! |---------|-------------|
//! | `{token}:timeline:{epoch}` | Concrete series for one run |
//! | `{token}:timeline:{epoch}:seed:{seed}` | Concrete series, seeded run |
//! | `{token}:timeline:latest` | Pointer to the newest concrete key |
//!
//! # Modules
//!
//! - [`cache`] -- Endpoint fallback, liveness probe, GET/SET operations
//! - [`publish`] -- Best-effort publication of a run's four series
//! - [`resolve`] -- Direct and latest-pointer read resolution
//! - [`error`] -- Shared error types

pub mod cache;
pub mod error;
pub mod publish;
pub mod resolve;

// Re-export primary types for convenience.
pub use cache::{CACHE_URL_ENV, CacheEndpoints, CachePool};
pub use error::StoreError;
pub use publish::{publish_timelines, publish_timelines_at};
pub use resolve::{fetch_by_key, fetch_latest};
