//! Entry point for the `seroline` binary.
//!
//! The runner orchestrates one timeline derivation end to end: optionally
//! invoke the external simulator, extract the run context from its report,
//! stream the event log through the aggregation pass, publish the four
//! timelines to the cache, and print the resulting keys as JSON.
//!
//! # Architecture
//!
//! ```text
//! simulator --> report facts --> scan (seroline-core) --> publish (seroline-store)
//!                                                             |
//!                                        stdout <-- keys <----+
//! ```
//!
//! The read side (`fetch`) bypasses the whole pipeline and resolves a
//! published series straight from the cache.

mod cli;
mod error;
mod fetch;
mod report;
mod run;
mod sim;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

/// Application entry point.
///
/// Initializes logging, parses the command line, and dispatches to the
/// requested subcommand.
///
/// # Errors
///
/// Returns an error when the subcommand fails; skips (missing log, unknown
/// start population, unreachable cache on the write path) are not failures.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run::execute(args).await?,
        Command::Fetch(args) => fetch::execute(args).await?,
    }

    Ok(())
}
