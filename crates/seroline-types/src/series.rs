//! Append-only time series and their JSON wire form.
//!
//! Series travel to the cache as a compact array of `[time, value]` pairs:
//! `[[0.0,500.0],[0.5,501.0]]`, or `[]` for an empty series. Points keep
//! insertion order and exact values; `serde_json` renders floats in
//! shortest-round-trip form, so decoding a serialized series reproduces it
//! exactly.

use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// One `[time, value]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint(
    /// Simulation time.
    pub f64,
    /// Metric value at that time.
    pub f64,
);

impl SeriesPoint {
    /// Build a point.
    pub const fn new(time: f64, value: f64) -> Self {
        Self(time, value)
    }

    /// Simulation time of this point.
    pub const fn time(self) -> f64 {
        self.0
    }

    /// Metric value of this point.
    pub const fn value(self) -> f64 {
        self.1
    }
}

/// An ordered, append-only series of [`SeriesPoint`]s.
///
/// Points are appended as the scan encounters qualifying events and are
/// never reordered or deduplicated; repeated timestamps are legal and
/// preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    /// Points in insertion order, oldest first.
    pub points: Vec<SeriesPoint>,
}

impl TimeSeries {
    /// An empty series.
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Append a point.
    pub fn push(&mut self, time: f64, value: f64) {
        self.points.push(SeriesPoint(time, value));
    }

    /// Number of points.
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points.
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recently appended point, if any.
    pub fn last(&self) -> Option<SeriesPoint> {
        self.points.last().copied()
    }

    /// Render the series as its `[[t,v],...]` wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a series from its `[[t,v],...]` wire form.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// The four series one completed run publishes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunTimelines {
    /// Population size over simulation time.
    pub population: TimeSeries,
    /// Cumulative transmissions over simulation time.
    pub infections: TimeSeries,
    /// Prevalence percent over simulation time.
    pub prevalence: TimeSeries,
    /// Incidence percent per calendar year, indexed by year-start time.
    pub incidence: TimeSeries,
}

impl RunTimelines {
    /// The series published under `metric`.
    pub const fn series(&self, metric: Metric) -> &TimeSeries {
        match metric {
            Metric::Population => &self.population,
            Metric::Infections => &self.infections,
            Metric::Prevalence => &self.prevalence,
            Metric::Incidence => &self.incidence,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_renders_as_empty_array() {
        let series = TimeSeries::new();
        assert_eq!(series.to_json().unwrap(), "[]");
    }

    #[test]
    fn points_render_as_pair_arrays_in_insertion_order() {
        let mut series = TimeSeries::new();
        series.push(0.0, 500.0);
        series.push(0.5, 501.0);
        series.push(2.0, 500.0);
        assert_eq!(
            series.to_json().unwrap(),
            "[[0.0,500.0],[0.5,501.0],[2.0,500.0]]"
        );
    }

    #[test]
    fn decode_reproduces_the_series_exactly() {
        let mut series = TimeSeries::new();
        series.push(0.1, 1.0 / 3.0);
        series.push(1e-9, 12_345.678_9);
        series.push(40.999_999, 99.999_999_999);

        let decoded = TimeSeries::from_json(&series.to_json().unwrap()).unwrap();
        assert_eq!(decoded, series);
    }

    #[test]
    fn repeated_timestamps_are_preserved() {
        let mut series = TimeSeries::new();
        series.push(1.5, 10.0);
        series.push(1.5, 11.0);

        let decoded = TimeSeries::from_json(&series.to_json().unwrap()).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.points.first().unwrap().value(), 10.0);
        assert_eq!(decoded.last().unwrap().value(), 11.0);
    }

    #[test]
    fn decodes_integer_literals_as_floats() {
        let series = TimeSeries::from_json("[[0,500],[1,501]]").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.points.first().unwrap().time(), 0.0);
        assert_eq!(series.points.first().unwrap().value(), 500.0);
    }

    #[test]
    fn rejects_malformed_wire_forms() {
        assert!(TimeSeries::from_json("{\"a\":1}").is_err());
        assert!(TimeSeries::from_json("[[1.0]]").is_err());
        assert!(TimeSeries::from_json("[[1.0,2.0,3.0]]").is_err());
        assert!(TimeSeries::from_json("not json").is_err());
    }
}
