//! The `run` subcommand: simulate (optionally), scan, publish, summarize.
//!
//! The caller gets the resulting cache keys, never the series bodies: the
//! summary printed to stdout names, per metric, the concrete key the series
//! was published under. A skipped pass and an unreachable cache both leave
//! the summary intact with the affected fields absent.

use std::collections::BTreeMap;

use serde::Serialize;

use seroline_core::{PassOutcome, PassSummary, SkipReason, run_pass};
use seroline_store::{CacheEndpoints, CachePool, publish_timelines};
use seroline_types::{Metric, RunContext};

use crate::cli::RunArgs;
use crate::error::RunnerError;
use crate::report::ReportFacts;
use crate::sim::SimulatorCommand;

/// Whether the aggregation pass ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The log was scanned and timelines were built.
    Completed,
    /// The pass did not run; `skip_reason` says why.
    Skipped,
}

/// JSON summary printed to stdout after a `run` invocation.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    /// Whether the aggregation pass ran.
    pub status: RunStatus,
    /// Why the pass was skipped, when it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    /// Start population the pass used (report-extracted or overridden).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_population: Option<u64>,
    /// End population as stated by the simulator's report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_population: Option<u64>,
    /// Simulated length in years as stated by the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulated_time: Option<f64>,
    /// Seed the cache keys were namespaced with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    /// Records folded into the aggregates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_processed: Option<u64>,
    /// Lines skipped as malformed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malformed_lines: Option<u64>,
    /// Population count when the scan finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_population: Option<i64>,
    /// Transmissions observed across the whole log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_infections: Option<u64>,
    /// Concrete cache key per published metric token; metrics whose write
    /// failed (or every metric, when no cache was reachable) are absent.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub keys: BTreeMap<String, String>,
}

impl RunSummary {
    const fn base(status: RunStatus, facts: ReportFacts, ctx: RunContext) -> Self {
        Self {
            status,
            skip_reason: None,
            start_population: ctx.start_population,
            end_population: facts.end_population,
            simulated_time: facts.simulated_time,
            seed: ctx.seed,
            events_processed: None,
            malformed_lines: None,
            final_population: None,
            cumulative_infections: None,
            keys: BTreeMap::new(),
        }
    }

    /// Summary of a pass that never ran.
    pub fn skipped(facts: ReportFacts, ctx: RunContext, reason: &SkipReason) -> Self {
        Self {
            skip_reason: Some(reason.to_string()),
            ..Self::base(RunStatus::Skipped, facts, ctx)
        }
    }

    /// Summary of a completed pass and its (possibly empty) publish result.
    pub fn completed(
        facts: ReportFacts,
        ctx: RunContext,
        pass: PassSummary,
        keys: BTreeMap<Metric, String>,
    ) -> Self {
        Self {
            events_processed: Some(pass.events_processed),
            malformed_lines: Some(pass.malformed_lines),
            final_population: Some(pass.final_population),
            cumulative_infections: Some(pass.cumulative_infections),
            keys: keys
                .into_iter()
                .map(|(metric, key)| (metric.token().to_owned(), key))
                .collect(),
            ..Self::base(RunStatus::Completed, facts, ctx)
        }
    }
}

/// Execute the `run` subcommand.
///
/// # Errors
///
/// Returns [`RunnerError`] when the simulator fails, the log is unreadable
/// mid-scan, or the summary cannot be rendered. A missing log, an unknown
/// start population, and an unreachable cache are all skips, not errors.
pub async fn execute(args: RunArgs) -> Result<(), RunnerError> {
    let facts = gather_facts(&args).await?;
    let ctx = RunContext::new(args.start_population.or(facts.start_population), args.seed);

    let summary = match run_pass(&args.log, ctx)? {
        PassOutcome::Skipped(reason) => RunSummary::skipped(facts, ctx, &reason),
        PassOutcome::Completed(report) => {
            let keys = match CachePool::connect_any(&CacheEndpoints::from_env()).await {
                Some(pool) => publish_timelines(&pool, &report.timelines, ctx.seed).await,
                None => BTreeMap::new(),
            };
            RunSummary::completed(facts, ctx, report.summary, keys)
        }
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Obtain the report facts: run the simulator, read a saved report file,
/// or fall back to flag-supplied context only.
async fn gather_facts(args: &RunArgs) -> Result<ReportFacts, RunnerError> {
    if let Some(binary) = &args.simulator {
        let config = args.config.clone().ok_or_else(|| {
            RunnerError::Invocation("--simulator requires --config".to_owned())
        })?;
        let command = SimulatorCommand {
            binary: binary.clone(),
            config,
            parallel: args.parallel,
            rng_mode: args.rng_mode.clone(),
            extra_args: args.sim_args.clone(),
            seed: args.seed,
        };
        let report = command.run().await?;
        Ok(ReportFacts::extract(&report))
    } else if let Some(path) = &args.report {
        let text = tokio::fs::read_to_string(path).await?;
        Ok(ReportFacts::extract(&text))
    } else {
        Ok(ReportFacts::default())
    }
}
