//! Assembles the per-run timelines and derives incidence.
//!
//! Three of the four published series accumulate live during the scan; the
//! incidence series cannot, because a year's rate needs the whole year's
//! transmission count. It is derived here, after the scan, from the
//! tracker's year buckets.

use std::collections::BTreeMap;

use seroline_types::{RunTimelines, TimeSeries};

use crate::tracker::{AggregateState, EPOCH_YEAR, YearBucket};

/// Consume a finished scan and assemble the four published series.
pub fn build_timelines(state: AggregateState) -> RunTimelines {
    let incidence = incidence_series(&state.year_buckets);
    RunTimelines {
        population: state.population_series,
        infections: state.infection_series,
        prevalence: state.prevalence_series,
        incidence,
    }
}

/// Per-year incidence: `100 * infections / year-start population`, placed
/// at the year's offset from the epoch. Years whose start population is
/// unknown or empty are omitted outright rather than zero-filled.
fn incidence_series(buckets: &BTreeMap<i32, YearBucket>) -> TimeSeries {
    let mut series = TimeSeries::new();
    // BTreeMap iteration is ascending, so points come out in year order.
    for (year, bucket) in buckets {
        if bucket.population_at_start <= 0 {
            continue;
        }
        #[allow(clippy::cast_precision_loss)] // counters and populations are far below 2^52
        let rate = 100.0 * bucket.infections as f64 / bucket.population_at_start as f64;
        series.push(f64::from(year.saturating_sub(EPOCH_YEAR)), rate);
    }
    series
}
