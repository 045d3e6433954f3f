//! The `fetch` subcommand: read a published series back from the cache.
//!
//! A thin wrapper over the retrieval resolver -- the stored wire form is
//! printed to stdout untouched. Unlike the write path, an unreachable cache
//! here is an error: a fetch with no store has nothing to degrade to.

use seroline_store::{CacheEndpoints, CachePool, fetch_by_key, fetch_latest};

use crate::cli::FetchArgs;
use crate::error::RunnerError;

/// Execute the `fetch` subcommand.
///
/// # Errors
///
/// Returns [`RunnerError::CacheUnavailable`] when no endpoint answers,
/// [`RunnerError::NotFound`] when the series does not exist, and
/// [`RunnerError::Store`] when a read itself fails.
pub async fn execute(args: FetchArgs) -> Result<(), RunnerError> {
    let pool = CachePool::connect_any(&CacheEndpoints::from_env())
        .await
        .ok_or(RunnerError::CacheUnavailable)?;

    let (target, value) = match (args.metric, args.key) {
        (Some(metric), _) => (metric.to_string(), fetch_latest(&pool, metric).await?),
        (None, Some(key)) => {
            let value = fetch_by_key(&pool, &key).await?;
            (key, value)
        }
        // clap enforces exactly one of the two.
        (None, None) => {
            return Err(RunnerError::Invocation(
                "fetch needs --metric or --key".to_owned(),
            ));
        }
    };

    match value {
        Some(body) => {
            println!("{body}");
            Ok(())
        }
        None => Err(RunnerError::NotFound(target)),
    }
}
