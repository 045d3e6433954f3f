//! Pattern extraction over the simulator's textual report.
//!
//! The simulator prints a free-form report; three facts in it matter to the
//! pipeline. Each is optional: a report that omits the start population
//! downgrades the run to "aggregation skipped" rather than failing.

use regex::Regex;

/// Facts extracted from one simulator report.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportFacts {
    /// Population size at simulation start (`Started with N people`).
    pub start_population: Option<u64>,
    /// Population size at simulation end (`ending with N`).
    pub end_population: Option<u64>,
    /// Simulated length in years (`Current simulation time is T`).
    pub simulated_time: Option<f64>,
}

impl ReportFacts {
    /// Extract all three facts from a report text.
    pub fn extract(report: &str) -> Self {
        Self {
            start_population: capture(report, r"Started with (\d+) people")
                .and_then(|s| s.parse().ok()),
            end_population: capture(report, r"ending with (\d+)").and_then(|s| s.parse().ok()),
            simulated_time: capture(report, r"Current simulation time is ([0-9.]+)")
                .and_then(|s| s.parse().ok()),
        }
    }
}

/// First capture group of `pattern` in `text`, if any.
///
/// The patterns above are literals that always compile; a pattern that
/// somehow does not simply yields no match.
fn capture(text: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_REPORT: &str = "\
        # Started with 500 people, ending with 487\n\
        # Current simulation time is 40.0016\n\
        # main event loop exited\n";

    #[test]
    fn extracts_all_three_facts() {
        let facts = ReportFacts::extract(SAMPLE_REPORT);
        assert_eq!(facts.start_population, Some(500));
        assert_eq!(facts.end_population, Some(487));
        assert_eq!(facts.simulated_time, Some(40.0016));
    }

    #[test]
    fn missing_facts_stay_none() {
        let facts = ReportFacts::extract("# simulation aborted early\n");
        assert_eq!(facts, ReportFacts::default());
    }

    #[test]
    fn partial_reports_yield_partial_facts() {
        let facts = ReportFacts::extract("ending with 12 and nothing else");
        assert_eq!(facts.start_population, None);
        assert_eq!(facts.end_population, Some(12));
        assert_eq!(facts.simulated_time, None);
    }

    #[test]
    fn empty_report_yields_defaults() {
        assert_eq!(ReportFacts::extract(""), ReportFacts::default());
    }
}
