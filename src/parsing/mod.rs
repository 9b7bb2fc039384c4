//! Parsers for the reference index flat files and for input name lists.
//!
//! - **Node files** (`<dataset>_node_dict.txt`): one taxon per line
//! - **Genus files** (`<dataset>_genus_dict.txt`): one genus token per line
//! - **Name lists**: one free-text organism name per line
//! - **Curation tables**: `raw_name<TAB>replacement`, header row first
//!
//! Any of these may be gzip-compressed (`.gz` suffix).
//!
//! ## Node file columns
//!
//! | # | Field | Notes |
//! |---|-------|-------|
//! | 1 | id | unique within the dataset |
//! | 2 | canonical name | |
//! | 3 | synonyms | `|`-joined, may be empty |
//! | 4 | rank | free-text label |
//! | 5 | lineage ids | `|`-joined, self first, root last |
//! | 6 | lineage rank codes | `|`-joined integers aligned with the ids |
//!
//! ## Genus file columns
//!
//! | # | Field |
//! |---|-------|
//! | 1 | sequence number |
//! | 2 | genus token |
//! | 3 | taxon ids, `|`-joined |

use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

pub mod genus;
pub mod names;
pub mod nodes;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{source_name} line {line}: expected at least {expected} tab-separated fields, found {found}")]
    TooFewFields {
        source_name: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{source_name} line {line}: invalid rank code '{value}'")]
    InvalidRankCode {
        source_name: String,
        line: usize,
        value: String,
    },

    #[error("{source_name} line {line}: {message}")]
    InvalidLineage {
        source_name: String,
        line: usize,
        message: String,
    },
}

/// Read a whole text file, transparently decompressing `.gz` files
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened or decoded.
pub fn read_text(path: &Path) -> Result<String, ParseError> {
    let file = std::fs::File::open(path)?;
    let mut content = String::new();

    let is_gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    if is_gzipped {
        BufReader::new(GzDecoder::new(file)).read_to_string(&mut content)?;
    } else {
        BufReader::new(file).read_to_string(&mut content)?;
    }

    Ok(content)
}

/// Split a `|`-joined field, dropping empty pieces
pub(crate) fn split_multi(field: &str) -> impl Iterator<Item = &str> {
    field.split('|').filter(|piece| !piece.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_read_plain_and_gzipped() {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("ncbi_genus_dict.txt");
        std::fs::write(&plain, "0\thomo\t9605|9606\n").unwrap();
        assert_eq!(read_text(&plain).unwrap(), "0\thomo\t9605|9606\n");

        let gz = dir.path().join("ncbi_genus_dict.txt.gz");
        let mut encoder = GzEncoder::new(std::fs::File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(b"0\thomo\t9605|9606\n").unwrap();
        encoder.finish().unwrap();
        assert_eq!(read_text(&gz).unwrap(), "0\thomo\t9605|9606\n");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_text(Path::new("/nonexistent/ncbi_node_dict.txt"));
        assert!(matches!(result, Err(ParseError::Io(_))));
    }

    #[test]
    fn test_split_multi() {
        let pieces: Vec<&str> = split_multi("a||b|").collect();
        assert_eq!(pieces, vec!["a", "b"]);
        assert_eq!(split_multi("").count(), 0);
    }
}
