//! Error types for the runner binary.
//!
//! Aggregation failures that the pipeline defines as skips never reach this
//! type; [`RunnerError`] covers the genuinely fatal paths of the two
//! subcommands -- an unreadable log mid-scan, a simulator that exited
//! nonzero, or a read request that cannot be served.

use std::process::ExitStatus;

/// Errors that abort a subcommand.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// An I/O operation failed (reading a report file, spawning the
    /// simulator).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The aggregation pass failed mid-scan.
    #[error("aggregation error: {0}")]
    Pass(#[from] seroline_core::PassError),

    /// A cache operation failed on the read path.
    #[error("store error: {0}")]
    Store(#[from] seroline_store::StoreError),

    /// Serializing the run summary failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The external simulator exited with a failure status.
    #[error("simulator exited with {status}")]
    SimulatorFailed {
        /// Exit status the simulator process reported.
        status: ExitStatus,
    },

    /// No cache endpoint answered the liveness probe on the read path.
    ///
    /// The write path degrades to a skip instead; a `fetch` without a
    /// reachable store has nothing useful to do.
    #[error("no cache endpoint reachable")]
    CacheUnavailable,

    /// The requested series does not exist in the cache.
    #[error("not found: {0}")]
    NotFound(String),

    /// The command line was incomplete in a way clap cannot express.
    #[error("invalid invocation: {0}")]
    Invocation(String),
}
