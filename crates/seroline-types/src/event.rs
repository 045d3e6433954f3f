//! Event records decoded from the simulation log.
//!
//! The simulator appends one line per discrete event. Each decoded line
//! becomes an [`EventRecord`]: a simulation timestamp plus a kind-specific
//! payload. Only four kinds carry aggregate-relevant data; every other kind
//! is preserved as [`EventKind::Other`] so the scan can still notice that
//! simulation time has advanced into a new calendar year.

use std::fmt;

/// Opaque identifier of one simulated individual.
///
/// The log writes person names such as `man_42` or `woman_7`; the pipeline
/// never inspects their structure, only compares them for equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(String);

impl PersonId {
    /// Wrap a raw identifier token.
    pub const fn new(raw: String) -> Self {
        Self(raw)
    }

    /// The raw identifier token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the raw token.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for PersonId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for PersonId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why an individual left the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MortalityCause {
    /// Background (non-AIDS) mortality.
    Natural,
    /// AIDS-related mortality.
    Aids,
}

/// Kind-specific payload of one event record.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// An individual was born. Population +1.
    Birth,
    /// An individual died. Population -1; the individual (when named)
    /// leaves the infection registry.
    Mortality {
        /// Cause of death.
        cause: MortalityCause,
        /// The deceased, when the log row carried the field.
        individual: Option<PersonId>,
    },
    /// An HIV transmission occurred. Cumulative infections +1; the
    /// recipient (when named) enters the infection registry.
    Transmission {
        /// Infecting individual, when the log row carried the field.
        source: Option<PersonId>,
        /// Newly infected individual, when the log row carried the field.
        recipient: Option<PersonId>,
    },
    /// Any other event kind. Legal, carries no aggregate delta, but still
    /// marks the passage of simulation time.
    Other {
        /// Kind name as written in the log.
        name: String,
    },
}

/// One decoded line of the simulation log.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Simulation time in years since the start of the run.
    ///
    /// The simulator emits records in non-decreasing time order; the
    /// pipeline relies on that and never re-sorts.
    pub time: f64,
    /// Kind-specific payload.
    pub kind: EventKind,
}

impl EventRecord {
    /// Build a record from a timestamp and payload.
    pub const fn new(time: f64, kind: EventKind) -> Self {
        Self { time, kind }
    }
}
