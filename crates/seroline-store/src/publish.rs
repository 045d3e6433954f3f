//! Best-effort publication of a run's timelines.
//!
//! Each run writes four concrete entries plus four `latest` pointers.
//! Concrete keys are namespaced by publish timestamp (and seed, when the
//! run was seeded) so concurrent runs never collide; pointer keys are
//! shared and last-writer-wins. Writes are independent: one failed SET is
//! logged and the remaining metrics still publish.

use std::collections::BTreeMap;

use chrono::Utc;

use seroline_types::{Metric, RunTimelines};

use crate::cache::CachePool;

/// Publish all four series, timestamping the keys with the current time.
///
/// Returns the concrete key written for each metric that fully persisted;
/// metrics whose write failed are absent from the map.
pub async fn publish_timelines(
    pool: &CachePool,
    timelines: &RunTimelines,
    seed: Option<i64>,
) -> BTreeMap<Metric, String> {
    publish_timelines_at(pool, timelines, seed, Utc::now().timestamp()).await
}

/// Publish all four series under keys namespaced by `epoch_seconds`.
///
/// The `latest` pointer for a metric is only overwritten after that
/// metric's concrete write landed, so a pointer never references a key
/// that failed to persist.
pub async fn publish_timelines_at(
    pool: &CachePool,
    timelines: &RunTimelines,
    seed: Option<i64>,
    epoch_seconds: i64,
) -> BTreeMap<Metric, String> {
    let mut keys = BTreeMap::new();

    for metric in Metric::ALL {
        let body = match timelines.series(metric).to_json() {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(metric = %metric, error = %err, "failed to serialize series");
                continue;
            }
        };

        let key = metric.timeline_key(epoch_seconds, seed);
        if let Err(err) = pool.set(&key, &body).await {
            tracing::warn!(metric = %metric, key, error = %err, "failed to write series");
            continue;
        }

        if let Err(err) = pool.set(&metric.latest_key(), &key).await {
            tracing::warn!(metric = %metric, key, error = %err, "failed to update latest pointer");
        }

        tracing::debug!(metric = %metric, key, points = timelines.series(metric).len(), "series published");
        keys.insert(metric, key);
    }

    tracing::info!(published = keys.len(), "timeline publish finished");
    keys
}
