//! Single-pass event log aggregation for the seroline timeline pipeline.
//!
//! This crate owns the forward scan that turns the simulator's event log
//! into four published timelines: parse each line, fold it into the running
//! aggregates, then reshape the collected snapshots into series.
//!
//! The scan is synchronous and allocation-light: the log is read once,
//! front to back, through a buffered reader, and every mutable aggregate
//! lives inside one pass-local [`tracker::AggregateState`] value.
//!
//! # Modules
//!
//! - [`parser`] -- One log line to one [`ParsedLine`] (blank, malformed,
//!   or a decoded event record).
//! - [`tracker`] -- Running aggregates: population, cumulative infections,
//!   the infection registry, and per-calendar-year buckets.
//! - [`timeline`] -- Assembles the tracker's series and derives the
//!   per-year incidence series from the year buckets.
//! - [`pass`] -- The scan driver: open, stream, count, summarize.

pub mod parser;
pub mod pass;
pub mod timeline;
pub mod tracker;

pub use parser::{ParsedLine, parse_line};
pub use pass::{PassError, PassOutcome, PassReport, PassSummary, SkipReason, run_pass};
pub use timeline::build_timelines;
pub use tracker::{AggregateState, EPOCH_YEAR, YearBucket};
