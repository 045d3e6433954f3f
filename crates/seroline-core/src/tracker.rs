//! Running aggregates folded over the event stream.
//!
//! One [`AggregateState`] value lives for exactly one pass. It consumes
//! decoded records in log order and maintains, concurrently:
//!
//! 1. The population count (+1 birth, -1 either mortality).
//! 2. The cumulative transmission count and the infection registry
//!    (recipients enter on transmission, the deceased leave on mortality).
//! 3. Per-calendar-year buckets for the later incidence derivation.
//!
//! # Design Principles
//!
//! - Counter updates use saturating arithmetic (no silent overflow, no
//!   panic on pathological logs).
//! - Prevalence is always derived from the registry's cardinality at the
//!   moment a point is appended -- it is never tracked as its own counter,
//!   so a mortality for an unregistered individual cannot skew it.
//! - Series points are appended after the event's own delta is applied;
//!   the year-start population snapshot is taken before it.

use std::collections::{BTreeMap, BTreeSet};

use seroline_types::{EventKind, EventRecord, PersonId, TimeSeries};

/// Calendar year of simulation time zero.
///
/// A fixed property of the simulation model, not configuration: the
/// simulator's time axis is decimal years since 1980.
pub const EPOCH_YEAR: i32 = 1980;

/// Per-calendar-year snapshot used to derive incidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBucket {
    /// Transmissions observed within the year.
    pub infections: u64,
    /// Population when the scan first entered the year, before that
    /// event's own delta.
    pub population_at_start: i64,
}

/// All mutable aggregates of one pass.
#[derive(Debug, Clone)]
pub struct AggregateState {
    /// Current population count.
    population: i64,
    /// Transmissions observed since the start of the log.
    cumulative_infections: u64,
    /// Individuals currently known to be HIV-positive.
    registry: BTreeSet<PersonId>,
    /// Year-keyed snapshots, ascending by calendar year.
    pub(crate) year_buckets: BTreeMap<i32, YearBucket>,
    /// Population size after each population-changing event.
    pub(crate) population_series: TimeSeries,
    /// Cumulative transmissions after each transmission.
    pub(crate) infection_series: TimeSeries,
    /// Prevalence percent after each aggregate-relevant event.
    pub(crate) prevalence_series: TimeSeries,
}

impl AggregateState {
    /// Start a pass from the simulator's reported start population.
    ///
    /// Seeds every live series with its time-zero point, so even an empty
    /// log yields one-point population/infection/prevalence series.
    pub fn new(start_population: u64) -> Self {
        let population = i64::try_from(start_population).unwrap_or(i64::MAX);

        let mut population_series = TimeSeries::new();
        population_series.push(0.0, population_value(population));
        let mut infection_series = TimeSeries::new();
        infection_series.push(0.0, 0.0);
        let mut prevalence_series = TimeSeries::new();
        prevalence_series.push(0.0, 0.0);

        Self {
            population,
            cumulative_infections: 0,
            registry: BTreeSet::new(),
            year_buckets: BTreeMap::new(),
            population_series,
            infection_series,
            prevalence_series,
        }
    }

    /// Fold one record into the aggregates.
    pub fn apply(&mut self, record: &EventRecord) {
        let year = calendar_year(record.time);
        // First event of any kind inside a calendar year freezes that
        // year's start-of-year population, pre-delta.
        self.year_buckets.entry(year).or_insert(YearBucket {
            infections: 0,
            population_at_start: self.population,
        });

        match &record.kind {
            EventKind::Birth => {
                self.population = self.population.saturating_add(1);
                self.population_series
                    .push(record.time, population_value(self.population));
                self.prevalence_series
                    .push(record.time, self.prevalence_percent());
            }
            EventKind::Mortality { individual, .. } => {
                self.population = self.population.saturating_sub(1);
                if let Some(id) = individual {
                    // Unregistered individuals are a no-op removal.
                    self.registry.remove(id);
                }
                self.population_series
                    .push(record.time, population_value(self.population));
                self.prevalence_series
                    .push(record.time, self.prevalence_percent());
            }
            EventKind::Transmission { recipient, .. } => {
                self.cumulative_infections = self.cumulative_infections.saturating_add(1);
                if let Some(id) = recipient {
                    self.registry.insert(id.clone());
                }
                if let Some(bucket) = self.year_buckets.get_mut(&year) {
                    bucket.infections = bucket.infections.saturating_add(1);
                }
                self.infection_series
                    .push(record.time, count_value(self.cumulative_infections));
                self.prevalence_series
                    .push(record.time, self.prevalence_percent());
            }
            EventKind::Other { .. } => {}
        }
    }

    /// Current population count.
    pub const fn population(&self) -> i64 {
        self.population
    }

    /// Transmissions observed so far.
    pub const fn cumulative_infections(&self) -> u64 {
        self.cumulative_infections
    }

    /// Whether an individual is currently in the infection registry.
    pub fn is_registered(&self, id: &PersonId) -> bool {
        self.registry.contains(id)
    }

    /// Number of individuals currently in the infection registry.
    pub fn registered_count(&self) -> usize {
        self.registry.len()
    }

    /// The year-keyed snapshots collected so far.
    pub const fn year_buckets(&self) -> &BTreeMap<i32, YearBucket> {
        &self.year_buckets
    }

    /// Prevalence percent derived from the registry, or 0 when the
    /// population is empty (never NaN, never negative).
    ///
    /// Clamped to 100: a degenerate log can register more recipients than
    /// the population count ever saw born.
    fn prevalence_percent(&self) -> f64 {
        if self.population <= 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)] // registry sizes are far below 2^52
        let registered = self.registry.len() as f64;
        (100.0 * registered / population_value(self.population)).min(100.0)
    }
}

/// Calendar year containing a simulation timestamp.
fn calendar_year(time: f64) -> i32 {
    // Simulation times are small year offsets; the floored sum stays far
    // inside i32 range.
    #[allow(clippy::cast_possible_truncation)]
    let year = (f64::from(EPOCH_YEAR) + time).floor() as i32;
    year
}

#[allow(clippy::cast_precision_loss)] // populations are far below 2^52
fn population_value(population: i64) -> f64 {
    population as f64
}

#[allow(clippy::cast_precision_loss)] // counters are far below 2^52
fn count_value(count: u64) -> f64 {
    count as f64
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use seroline_types::{MortalityCause, SeriesPoint};

    /// Helper building a transmission record with both ids present.
    fn transmission(time: f64, source: &str, recipient: &str) -> EventRecord {
        EventRecord::new(
            time,
            EventKind::Transmission {
                source: Some(PersonId::from(source)),
                recipient: Some(PersonId::from(recipient)),
            },
        )
    }

    /// Helper building a mortality record.
    fn mortality(time: f64, cause: MortalityCause, individual: &str) -> EventRecord {
        EventRecord::new(
            time,
            EventKind::Mortality {
                cause,
                individual: Some(PersonId::from(individual)),
            },
        )
    }

    #[test]
    fn seeds_time_zero_points() {
        let state = AggregateState::new(500);
        assert_eq!(
            state.population_series.points,
            vec![SeriesPoint::new(0.0, 500.0)]
        );
        assert_eq!(state.infection_series.points, vec![SeriesPoint::new(0.0, 0.0)]);
        assert_eq!(state.prevalence_series.points, vec![SeriesPoint::new(0.0, 0.0)]);
    }

    #[test]
    fn births_append_post_delta_population_points() {
        let mut state = AggregateState::new(100);
        state.apply(&EventRecord::new(0.25, EventKind::Birth));
        state.apply(&EventRecord::new(0.75, EventKind::Birth));

        assert_eq!(state.population(), 102);
        let points = &state.population_series.points;
        assert_eq!(points.len(), 3);
        assert_eq!(points.get(1).unwrap().value(), 101.0);
        assert_eq!(points.get(2).unwrap().value(), 102.0);
        // Births alone never touch the infection series.
        assert_eq!(state.infection_series.len(), 1);
    }

    #[test]
    fn mortality_decrements_population_either_cause() {
        let mut state = AggregateState::new(10);
        state.apply(&mortality(1.0, MortalityCause::Natural, "man_1"));
        state.apply(&mortality(1.5, MortalityCause::Aids, "woman_2"));
        assert_eq!(state.population(), 8);
    }

    #[test]
    fn registry_membership_spans_transmission_to_mortality() {
        let mut state = AggregateState::new(100);
        let person = PersonId::from("woman_9");

        assert!(!state.is_registered(&person));
        state.apply(&transmission(1.0, "man_5", "woman_9"));
        assert!(state.is_registered(&person));
        state.apply(&mortality(2.0, MortalityCause::Aids, "woman_9"));
        assert!(!state.is_registered(&person));
    }

    #[test]
    fn removing_an_unregistered_individual_changes_nothing() {
        let mut state = AggregateState::new(100);
        state.apply(&transmission(1.0, "man_5", "woman_9"));
        state.apply(&mortality(2.0, MortalityCause::Natural, "man_1"));

        assert_eq!(state.registered_count(), 1);
        // Population still dropped, prevalence recomputed from the registry.
        assert_eq!(state.population(), 99);
        assert_eq!(
            state.prevalence_series.last().unwrap().value(),
            100.0 / 99.0
        );
    }

    #[test]
    fn duplicate_transmission_counts_twice_but_registers_once() {
        let mut state = AggregateState::new(100);
        state.apply(&transmission(1.0, "man_5", "woman_9"));
        state.apply(&transmission(1.5, "man_6", "woman_9"));

        assert_eq!(state.cumulative_infections(), 2);
        assert_eq!(state.registered_count(), 1);
    }

    #[test]
    fn transmission_without_recipient_still_counts() {
        let mut state = AggregateState::new(100);
        state.apply(&EventRecord::new(
            1.0,
            EventKind::Transmission {
                source: Some(PersonId::from("man_5")),
                recipient: None,
            },
        ));

        assert_eq!(state.cumulative_infections(), 1);
        assert_eq!(state.registered_count(), 0);
        // The cumulative point appends; prevalence stays registry-driven.
        assert_eq!(state.infection_series.last().unwrap().value(), 1.0);
        assert_eq!(state.prevalence_series.last().unwrap().value(), 0.0);
    }

    #[test]
    fn prevalence_is_computed_after_the_delta() {
        let mut state = AggregateState::new(500);
        state.apply(&EventRecord::new(0.5, EventKind::Birth));
        state.apply(&transmission(1.2, "man_1", "woman_1"));

        // 1 registered of 501 alive.
        assert_eq!(
            state.prevalence_series.last().unwrap().value(),
            100.0 / 501.0
        );
    }

    #[test]
    fn prevalence_never_exceeds_one_hundred() {
        let mut state = AggregateState::new(2);
        // Three distinct recipients against a population of two.
        state.apply(&transmission(0.1, "man_1", "woman_1"));
        state.apply(&transmission(0.2, "man_1", "woman_2"));
        state.apply(&transmission(0.3, "man_1", "woman_3"));

        assert_eq!(state.registered_count(), 3);
        for point in &state.prevalence_series.points {
            assert!(point.value() >= 0.0);
            assert!(point.value() <= 100.0);
        }
        assert_eq!(state.prevalence_series.last().unwrap().value(), 100.0);
    }

    #[test]
    fn prevalence_is_zero_when_population_is_exhausted() {
        let mut state = AggregateState::new(1);
        state.apply(&transmission(0.5, "man_1", "woman_1"));
        state.apply(&mortality(1.0, MortalityCause::Natural, "man_2"));
        state.apply(&mortality(1.5, MortalityCause::Natural, "man_3"));

        assert_eq!(state.population(), -1);
        assert_eq!(state.prevalence_series.last().unwrap().value(), 0.0);
    }

    #[test]
    fn other_events_open_year_buckets_without_series_points() {
        let mut state = AggregateState::new(200);
        state.apply(&EventRecord::new(
            3.4,
            EventKind::Other {
                name: "formation".to_owned(),
            },
        ));

        assert_eq!(state.population_series.len(), 1);
        assert_eq!(state.prevalence_series.len(), 1);
        let bucket = state.year_buckets().get(&1983).unwrap();
        assert_eq!(bucket.population_at_start, 200);
        assert_eq!(bucket.infections, 0);
    }

    #[test]
    fn year_start_population_is_snapshotted_before_the_delta() {
        let mut state = AggregateState::new(500);
        // First event of 1980 is itself a birth: snapshot must say 500.
        state.apply(&EventRecord::new(0.5, EventKind::Birth));
        // First event of 1981 is a transmission: snapshot must say 501.
        state.apply(&transmission(1.2, "man_1", "woman_1"));

        let buckets = state.year_buckets();
        assert_eq!(buckets.get(&1980).unwrap().population_at_start, 500);
        assert_eq!(buckets.get(&1981).unwrap().population_at_start, 501);
        assert_eq!(buckets.get(&1981).unwrap().infections, 1);
    }

    #[test]
    fn year_buckets_skip_eventless_years() {
        let mut state = AggregateState::new(500);
        state.apply(&EventRecord::new(0.2, EventKind::Birth));
        state.apply(&EventRecord::new(2.7, EventKind::Birth));

        let years: Vec<i32> = state.year_buckets().keys().copied().collect();
        assert_eq!(years, vec![1980, 1982]);
    }

    #[test]
    fn whole_year_boundary_lands_in_the_new_year() {
        let mut state = AggregateState::new(500);
        state.apply(&EventRecord::new(2.0, EventKind::Birth));
        assert!(state.year_buckets().contains_key(&1982));
    }
}
