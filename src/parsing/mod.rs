//! Parsers for the text produced by external tools and for sequence inputs.
//!
//! This module provides parsers for:
//!
//! - **Interaction tables**: Semicolon-delimited output of the interaction prediction tool
//! - **FASTA files**: Query and target sequences, plain or gzip compressed
//! - **Fold output**: Structure and minimum free energy of a single folded sequence
//!
//! ## Example
//!
//! ```rust
//! use rna_interact::parsing::interactions::parse_interactions;
//!
//! let output = "id1;start1;end1;id2;start2;end2;hybridDP;E\n\
//!               ompA;13;24;RybB;1;12;((((((&))))));-8.2\n";
//! let parsed = parse_interactions(output, "srna", "mrna", 5);
//! assert_eq!(parsed.records.len(), 1);
//! assert_eq!(parsed.records[0].hybrid_length, Some(12));
//! ```
//!
//! ## Accepted Columns
//!
//! | Field | Header names (priority order) | Required |
//! |-------|-------------------------------|----------|
//! | deltaG | `E`, `E_total`, `energy` | No (0.0) |
//! | hybrid descriptor | `hybridDP`, `hybrid` | No |
//! | target name | `id1`, `seq1` | No |
//! | query name | `id2`, `seq2` | No |
//! | target coordinates | `start1`, `end1` | No |
//! | query coordinates | `start2`, `end2` | No |

pub mod fasta;
pub mod fold;
pub mod interactions;

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

/// Read a text input; `-` reads stdin and `.gz` files are decompressed
///
/// # Errors
///
/// Returns an IO error if the input cannot be read or is not valid UTF-8.
pub fn read_text_input(path: &Path) -> std::io::Result<String> {
    let mut buffer = String::new();
    if path.to_string_lossy() == "-" {
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    let file = std::fs::File::open(path)?;
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
    {
        GzDecoder::new(file).read_to_string(&mut buffer)?;
    } else {
        std::io::BufReader::new(file).read_to_string(&mut buffer)?;
    }
    Ok(buffer)
}
