//! Parser for single-sequence folding output.
//!
//! The folding tool prints three lines per sequence:
//!
//! ```text
//! >example_srna
//! AUGCUACGUGAAGGCU
//! ((((....)))).... ( -3.40)
//! ```
//!
//! The minimum free energy is the text inside the last parenthesis pair of the
//! structure line.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::sequence::gc_content;

#[derive(Error, Debug, PartialEq)]
pub enum FoldParseError {
    #[error("Unexpected fold output: expected 3 lines, found {0}")]
    TooFewLines(usize),

    #[error("No parentheses with MFE found in structure line: '{0}'")]
    MissingEnergy(String),

    #[error("Could not parse MFE '{value}' in structure line: '{line}'")]
    InvalidEnergy { line: String, value: String },
}

/// Structure and minimum free energy of one folded sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldResult {
    pub name: String,
    pub sequence: String,
    pub structure: String,
    /// Minimum free energy (kcal/mol)
    pub mfe: f64,
    pub gc_content: f64,
    pub raw_stdout: String,
}

/// Parse folding tool output for a single sequence
///
/// # Errors
///
/// Returns `FoldParseError::TooFewLines` if fewer than three lines are present,
/// `FoldParseError::MissingEnergy` if the structure line has no `( energy )`
/// suffix, or `FoldParseError::InvalidEnergy` if the energy is not a number.
pub fn parse_fold_output(text: &str) -> Result<FoldResult, FoldParseError> {
    let stdout = text.trim();
    let lines: Vec<&str> = stdout.lines().collect();
    if lines.len() < 3 {
        return Err(FoldParseError::TooFewLines(lines.len()));
    }

    let name = lines[0].trim_start_matches('>').trim();
    let sequence = lines[1].trim();
    let structure_line = lines[2].trim();

    let (Some(open), Some(close)) = (structure_line.rfind('('), structure_line.rfind(')')) else {
        return Err(FoldParseError::MissingEnergy(structure_line.to_string()));
    };
    if close <= open {
        return Err(FoldParseError::MissingEnergy(structure_line.to_string()));
    }

    let value = structure_line[open + 1..close].trim();
    let mfe: f64 = value.parse().map_err(|_| FoldParseError::InvalidEnergy {
        line: structure_line.to_string(),
        value: value.to_string(),
    })?;

    Ok(FoldResult {
        name: name.to_string(),
        sequence: sequence.to_string(),
        structure: structure_line[..open].trim().to_string(),
        mfe,
        gc_content: gc_content(sequence),
        raw_stdout: stdout.to_string(),
    })
}
