//! Command line definition for the `seroline` binary.
//!
//! Two subcommands: `run` aggregates one simulation run's event log and
//! publishes its timelines; `fetch` reads a published series back, either
//! by concrete key or via the `latest` pointer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use seroline_types::Metric;

/// Derive and publish epidemiological timelines from a stochastic
/// population simulator's event log.
#[derive(Debug, Parser)]
#[command(name = "seroline", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate one run's event log and publish its timelines.
    Run(RunArgs),
    /// Fetch a published series from the cache.
    Fetch(FetchArgs),
}

/// Arguments of the `run` subcommand.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to the event log the simulator left behind.
    #[arg(long)]
    pub log: PathBuf,

    /// Path to a saved simulator report to extract the run context from.
    #[arg(long, conflicts_with = "simulator")]
    pub report: Option<PathBuf>,

    /// Start population, overriding anything the report states.
    #[arg(long)]
    pub start_population: Option<u64>,

    /// Random seed the simulator ran with; namespaces the cache keys and
    /// is forwarded to the simulator when one is invoked.
    #[arg(long, allow_hyphen_values = true)]
    pub seed: Option<i64>,

    /// Simulator binary to invoke before aggregating.
    #[arg(long)]
    pub simulator: Option<PathBuf>,

    /// Simulator configuration file (required with --simulator).
    #[arg(long, requires = "simulator")]
    pub config: Option<PathBuf>,

    /// Ask the simulator for a parallel run.
    #[arg(long, requires = "simulator")]
    pub parallel: bool,

    /// RNG algorithm argument passed to the simulator.
    #[arg(long, default_value = "opt", requires = "simulator")]
    pub rng_mode: String,

    /// Extra argument appended to the simulator command line (repeatable).
    #[arg(long = "sim-arg", requires = "simulator")]
    pub sim_args: Vec<String>,
}

/// Arguments of the `fetch` subcommand.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Metric to resolve via its `latest` pointer (`population`,
    /// `hiv:infections`, `hiv:prevalence`, `hiv:incidence`).
    #[arg(long, required_unless_present = "key", conflicts_with = "key")]
    pub metric: Option<Metric>,

    /// Concrete cache key to fetch directly.
    #[arg(long)]
    pub key: Option<String>,
}
