//! Event record parser for the simulator's log format.
//!
//! The log is plain UTF-8 text, one event per line, comma-separated, no
//! header, no quoting. Lines are variably shaped: every line starts with a
//! timestamp and a kind name, and each kind places its payload at fixed
//! absolute field positions.
//!
//! # Field Layout
//!
//! | Field | Content |
//! |-------|---------|
//! | 0 | Simulation time (decimal years) |
//! | 1 | Event kind name |
//! | 2 | Deceased individual (mortality) / source individual (transmission) |
//! | 6 | Recipient individual (transmission) |
//!
//! Payload fields fail soft: a short row or an empty field decodes to
//! `None`, never to a parse failure. Only an unusable timestamp or a
//! missing kind name marks a line malformed.

use seroline_types::{EventKind, EventRecord, MortalityCause, PersonId};

/// Field holding the deceased individual on mortality records.
const INDIVIDUAL_FIELD: usize = 2;
/// Field holding the infecting individual on transmission records.
const SOURCE_FIELD: usize = 2;
/// Field holding the newly infected individual on transmission records.
const RECIPIENT_FIELD: usize = 6;

/// Classification of one raw log line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// Empty or whitespace-only. Not an event, not an error.
    Blank,
    /// Unusable timestamp or missing kind name. Counted and skipped.
    Malformed,
    /// A decoded event record.
    Record(EventRecord),
}

/// Decode one raw log line.
///
/// The timestamp must parse as a finite `f64` and the kind name must be
/// present; everything else degrades gracefully. Unrecognized kind names
/// decode to [`EventKind::Other`] so the scan still observes the passage
/// of simulation time.
pub fn parse_line(line: &str) -> ParsedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ParsedLine::Blank;
    }

    let fields: Vec<&str> = trimmed.split(',').collect();

    let Some(time) = fields.first().and_then(|raw| raw.trim().parse::<f64>().ok()) else {
        return ParsedLine::Malformed;
    };
    // "nan"/"inf" parse as f64 but would poison every downstream aggregate.
    if !time.is_finite() {
        return ParsedLine::Malformed;
    }

    let Some(kind_name) = fields.get(1).map(|raw| raw.trim()).filter(|name| !name.is_empty()) else {
        return ParsedLine::Malformed;
    };

    let kind = match kind_name {
        "birth" => EventKind::Birth,
        "normalmortality" => EventKind::Mortality {
            cause: MortalityCause::Natural,
            individual: person_field(&fields, INDIVIDUAL_FIELD),
        },
        "aidsmortality" => EventKind::Mortality {
            cause: MortalityCause::Aids,
            individual: person_field(&fields, INDIVIDUAL_FIELD),
        },
        "transmission" => EventKind::Transmission {
            source: person_field(&fields, SOURCE_FIELD),
            recipient: person_field(&fields, RECIPIENT_FIELD),
        },
        other => EventKind::Other {
            name: other.to_owned(),
        },
    };

    ParsedLine::Record(EventRecord::new(time, kind))
}

/// Decode an optional person field at an absolute position.
fn person_field(fields: &[&str], index: usize) -> Option<PersonId> {
    fields
        .get(index)
        .map(|raw| raw.trim())
        .filter(|raw| !raw.is_empty())
        .map(PersonId::from)
}
