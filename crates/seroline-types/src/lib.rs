//! Shared type definitions for the seroline timeline pipeline.
//!
//! This crate is the single source of truth for the types that cross crate
//! boundaries in the seroline workspace: the event records decoded from the
//! simulator's log, the metric identifiers and their cache key scheme, the
//! time series and their compact wire form, and the per-run context.
//!
//! # Modules
//!
//! - [`event`] -- Event records decoded from the simulation log
//! - [`metric`] -- Published metric identifiers and cache key naming
//! - [`series`] -- Append-only time series and their JSON wire form
//! - [`run`] -- Per-run context extracted from the simulator's report

pub mod event;
pub mod metric;
pub mod run;
pub mod series;

// Re-export all public types at crate root for convenience.
pub use event::{EventKind, EventRecord, MortalityCause, PersonId};
pub use metric::{Metric, UnknownMetric};
pub use run::RunContext;
pub use series::{RunTimelines, SeriesPoint, TimeSeries};
