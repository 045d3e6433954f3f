//! Per-run context extracted from the simulator's report.

/// Inputs the aggregation pass needs beyond the log itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Population size at simulation start.
    ///
    /// `None` when the simulator's report did not state it (or stated a
    /// negative value); the aggregation stage is then skipped outright.
    pub start_population: Option<u64>,
    /// Random seed the simulator ran with, when one was supplied.
    ///
    /// Used only to namespace the published cache keys.
    pub seed: Option<i64>,
}

impl RunContext {
    /// Build a context from an optional start population and seed.
    pub const fn new(start_population: Option<u64>, seed: Option<i64>) -> Self {
        Self {
            start_population,
            seed,
        }
    }
}
