//! The scan driver: one log file in, four timelines out.
//!
//! A pass either completes (the log was streamed to end of file) or is
//! skipped for an expected reason -- the log does not exist yet, or the
//! simulator's report never stated a start population. Skips are modeled
//! as an [`Ok`] outcome: downstream callers treat them as "nothing to
//! publish", not as failures. Only a genuine mid-scan read error aborts.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use seroline_types::{RunContext, RunTimelines};

use crate::parser::{ParsedLine, parse_line};
use crate::timeline::build_timelines;
use crate::tracker::AggregateState;

/// Why a pass was skipped rather than run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The event log file does not exist.
    LogMissing(PathBuf),
    /// The run context carried no usable start population.
    StartPopulationUnknown,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogMissing(path) => write!(f, "event log not found at {}", path.display()),
            Self::StartPopulationUnknown => f.write_str("start population unknown"),
        }
    }
}

/// Errors that abort a pass outright.
#[derive(Debug, thiserror::Error)]
pub enum PassError {
    /// The event log existed but could not be read to end of file.
    #[error("failed to read event log: {0}")]
    Io(#[from] std::io::Error),
}

/// Counters describing one completed scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Raw lines seen, including blank and malformed ones.
    pub lines_total: u64,
    /// Records decoded and folded into the aggregates.
    pub events_processed: u64,
    /// Lines skipped as malformed.
    pub malformed_lines: u64,
    /// Population count when the scan finished.
    pub final_population: i64,
    /// Transmissions observed across the whole log.
    pub cumulative_infections: u64,
}

/// One completed pass: the four timelines plus the scan counters.
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    /// The series to publish.
    pub timelines: RunTimelines,
    /// What the scan saw on the way.
    pub summary: PassSummary,
}

/// Outcome of a pass request.
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    /// The log was streamed to end of file.
    Completed(PassReport),
    /// The pass did not run; an expected outcome, not an error.
    Skipped(SkipReason),
}

/// Run one aggregation pass over the event log at `log_path`.
///
/// The log is read exactly once, front to back. Malformed lines are
/// counted and skipped; they never abort the scan.
///
/// # Errors
///
/// Returns [`PassError::Io`] only when the log exists but reading it
/// fails mid-scan. Absent inputs surface as [`PassOutcome::Skipped`].
pub fn run_pass(log_path: &Path, ctx: RunContext) -> Result<PassOutcome, PassError> {
    let Some(start_population) = ctx.start_population else {
        tracing::info!("start population unknown, skipping aggregation");
        return Ok(PassOutcome::Skipped(SkipReason::StartPopulationUnknown));
    };

    let file = match File::open(log_path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::info!(
                path = %log_path.display(),
                "event log missing, skipping aggregation"
            );
            return Ok(PassOutcome::Skipped(SkipReason::LogMissing(
                log_path.to_path_buf(),
            )));
        }
        Err(err) => return Err(PassError::Io(err)),
    };

    tracing::debug!(
        path = %log_path.display(),
        start_population,
        "event log scan starting"
    );

    let mut state = AggregateState::new(start_population);
    let mut summary = PassSummary::default();

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        summary.lines_total = summary.lines_total.saturating_add(1);
        match parse_line(&line) {
            ParsedLine::Blank => {}
            ParsedLine::Malformed => {
                summary.malformed_lines = summary.malformed_lines.saturating_add(1);
                tracing::debug!(line = index.saturating_add(1), "skipping malformed event record");
            }
            ParsedLine::Record(record) => {
                state.apply(&record);
                summary.events_processed = summary.events_processed.saturating_add(1);
            }
        }
    }

    summary.final_population = state.population();
    summary.cumulative_infections = state.cumulative_infections();

    tracing::info!(
        events = summary.events_processed,
        malformed = summary.malformed_lines,
        final_population = summary.final_population,
        infections = summary.cumulative_infections,
        "event log scan complete"
    );

    Ok(PassOutcome::Completed(PassReport {
        timelines: build_timelines(state),
        summary,
    }))
}
