//! Parser for the semicolon-delimited table written by the interaction
//! prediction tool in CSV output mode.
//!
//! ```text
//! # comments and blank lines are ignored
//! id1;start1;end1;id2;start2;end2;subseqDP;hybridDP;E
//! ompA;13;36;RybB;1;24;...;((((((&))))));-8.2
//! ```
//!
//! Sequence 1 is the target (mRNA) and sequence 2 the query (sRNA), so
//! `start1`/`end1` are target coordinates, not query coordinates. Every
//! logical field is looked up through an ordered list of accepted header
//! names; the first non-empty value wins.

use std::collections::HashMap;

use csv::StringRecord;
use thiserror::Error;
use tracing::debug;

use crate::core::interaction::InteractionRecord;

pub const NOTE_NO_OUTPUT: &str = "no output";
pub const NOTE_HEADER_ONLY: &str = "no interactions — header only";

pub const FIELD_DELIMITER: u8 = b';';

/// Accepted header names for the interaction energy
pub const ENERGY_COLUMNS: &[&str] = &["E", "E_total", "energy"];
/// Accepted header names for the hybridization descriptor
pub const HYBRID_COLUMNS: &[&str] = &["hybridDP", "hybrid"];
pub const TARGET_NAME_COLUMNS: &[&str] = &["id1", "seq1"];
pub const QUERY_NAME_COLUMNS: &[&str] = &["id2", "seq2"];
pub const TARGET_START_COLUMNS: &[&str] = &["start1"];
pub const TARGET_END_COLUMNS: &[&str] = &["end1"];
pub const QUERY_START_COLUMNS: &[&str] = &["start2"];
pub const QUERY_END_COLUMNS: &[&str] = &["end2"];

/// Characters dropped from a hybridization descriptor before measuring it
const HYBRID_SEPARATORS: &[char] = &['&', ' '];

/// Records accepted from one tool output, with a note when there were none
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedInteractions {
    pub records: Vec<InteractionRecord>,
    pub note: Option<String>,
}

/// Header name -> column index
struct Columns {
    index: HashMap<String, usize>,
    width: usize,
}

impl Columns {
    fn new(header: &StringRecord) -> Self {
        // Later duplicates win, as with a dict built from the header row
        let index = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i))
            .collect();
        Self {
            index,
            width: header.len(),
        }
    }

    /// First non-empty value among `aliases`, in priority order
    fn first<'r>(&self, record: &'r StringRecord, aliases: &[&str]) -> Option<&'r str> {
        aliases
            .iter()
            .filter_map(|alias| self.index.get(*alias))
            .filter_map(|&i| record.get(i))
            .find(|value| !value.is_empty())
    }
}

/// Why a row was dropped
#[derive(Error, Debug)]
enum RowError {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("expected {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },
}

/// Parse prediction tool output into ranked interaction records.
///
/// Comment lines (`#`) and blank lines are dropped first. Zero remaining lines
/// yield the note [`NOTE_NO_OUTPUT`], a lone header line yields
/// [`NOTE_HEADER_ONLY`]. Malformed rows are skipped. At most `max_records`
/// rows are accepted, in source order, and each gets its 1-based position
/// among accepted rows as provisional rank.
#[must_use]
pub fn parse_interactions(
    raw_text: &str,
    query_name_default: &str,
    target_name_default: &str,
    max_records: usize,
) -> ParsedInteractions {
    let lines: Vec<&str> = raw_text
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .collect();

    match lines.len() {
        0 => {
            return ParsedInteractions {
                records: Vec::new(),
                note: Some(NOTE_NO_OUTPUT.to_string()),
            }
        }
        1 => {
            return ParsedInteractions {
                records: Vec::new(),
                note: Some(NOTE_HEADER_ONLY.to_string()),
            }
        }
        _ => {}
    }

    let mut records = Vec::new();
    if max_records == 0 {
        return ParsedInteractions {
            records,
            note: None,
        };
    }

    let text = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = match reader.headers() {
        Ok(header) => Columns::new(header),
        Err(e) => {
            debug!(error = %e, "Unreadable header line, no records parsed");
            return ParsedInteractions {
                records,
                note: None,
            };
        }
    };

    for (row, result) in reader.records().enumerate() {
        let parsed = result.map_err(RowError::from).and_then(|record| {
            parse_row(
                &columns,
                &record,
                records.len() + 1,
                query_name_default,
                target_name_default,
            )
        });

        match parsed {
            Ok(interaction) => records.push(interaction),
            Err(e) => {
                // Row numbers are 1-based after the header
                debug!(row = row + 1, error = %e, "Skipping malformed interaction row");
                continue;
            }
        }

        if records.len() >= max_records {
            break;
        }
    }

    ParsedInteractions {
        records,
        note: None,
    }
}

fn parse_row(
    columns: &Columns,
    record: &StringRecord,
    rank: usize,
    query_name_default: &str,
    target_name_default: &str,
) -> Result<InteractionRecord, RowError> {
    if record.len() < columns.width {
        return Err(RowError::TooFewFields {
            expected: columns.width,
            found: record.len(),
        });
    }

    let delta_g = columns
        .first(record, ENERGY_COLUMNS)
        .map_or(0.0, parse_energy);

    let hybrid_length = columns.first(record, HYBRID_COLUMNS).map(|descriptor| {
        descriptor
            .chars()
            .filter(|c| !HYBRID_SEPARATORS.contains(c))
            .count()
    });

    let coordinate = |aliases: &[&str]| columns.first(record, aliases).and_then(parse_coordinate);

    let raw_row = record
        .iter()
        .take(columns.width)
        .collect::<Vec<_>>()
        .join(";");

    Ok(InteractionRecord {
        rank,
        query_name: columns
            .first(record, QUERY_NAME_COLUMNS)
            .unwrap_or(query_name_default)
            .to_string(),
        target_name: columns
            .first(record, TARGET_NAME_COLUMNS)
            .unwrap_or(target_name_default)
            .to_string(),
        delta_g,
        query_start: coordinate(QUERY_START_COLUMNS),
        query_end: coordinate(QUERY_END_COLUMNS),
        target_start: coordinate(TARGET_START_COLUMNS),
        target_end: coordinate(TARGET_END_COLUMNS),
        hybrid_length,
        quality_score: None,
        raw_row,
    })
}

/// Energy value, 0.0 when it is not a finite number
fn parse_energy(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|energy| energy.is_finite())
        .unwrap_or(0.0)
}

/// 1-based coordinate, absent when it is not a non-negative integer
fn parse_coordinate(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}
