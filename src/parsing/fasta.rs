//! Read query/target sequences from FASTA files using noodles.
//!
//! Supports both uncompressed and gzip/bgzip compressed files. Only the first
//! record of a file is used.

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse FASTA record: {0}")]
    Fasta(String),

    #[error("No sequences found in FASTA file")]
    NoRecords,
}

/// A named nucleotide sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSequence {
    pub name: String,
    pub sequence: String,
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read the first record of a FASTA file.
///
/// # Errors
///
/// Returns `SequenceError::Io` if the file cannot be read, `SequenceError::Fasta`
/// if the record is malformed, or `SequenceError::NoRecords` for an empty file.
pub fn read_first_sequence(path: &Path) -> Result<NamedSequence, SequenceError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        read_first_record(BufReader::new(GzDecoder::new(file)))
    } else {
        read_first_record(BufReader::new(file))
    }
}

fn read_first_record<R: BufRead>(reader: R) -> Result<NamedSequence, SequenceError> {
    let mut fasta_reader = fasta::io::Reader::new(reader);

    let record = fasta_reader
        .records()
        .next()
        .ok_or(SequenceError::NoRecords)?
        .map_err(|e| SequenceError::Fasta(e.to_string()))?;

    let name = String::from_utf8_lossy(record.name()).to_string();
    let sequence = String::from_utf8_lossy(record.sequence().as_ref()).to_string();

    Ok(NamedSequence { name, sequence })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_first_sequence() {
        let fasta_content = b">RybB small RNA\nGCCACUGCUU\nUUCUUUGAUG\n>second\nACGU\n";

        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(fasta_content).unwrap();
        temp.flush().unwrap();

        let seq = read_first_sequence(temp.path()).unwrap();
        assert_eq!(seq.name, "RybB");
        assert_eq!(seq.sequence, "GCCACUGCUUUUCUUUGAUG");
    }

    #[test]
    fn test_read_gzipped_sequence() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        let mut encoder = GzEncoder::new(temp.reopen().unwrap(), Compression::default());
        encoder.write_all(b">ompA\nAUGAAAAAGACAGCUAUC\n").unwrap();
        encoder.finish().unwrap();

        let seq = read_first_sequence(temp.path()).unwrap();
        assert_eq!(seq.name, "ompA");
        assert_eq!(seq.sequence, "AUGAAAAAGACAGCUAUC");
    }

    #[test]
    fn test_read_empty_fasta() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b"").unwrap();
        temp.flush().unwrap();

        let result = read_first_sequence(temp.path());
        assert!(matches!(result, Err(SequenceError::NoRecords)));
    }

    #[test]
    fn test_missing_file() {
        let result = read_first_sequence(Path::new("/nonexistent/query.fa"));
        assert!(matches!(result, Err(SequenceError::Io(_))));
    }
}
