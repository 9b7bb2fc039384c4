use crate::core::types::TaxonId;
use crate::parsing::{split_multi, ParseError};

/// Minimum number of tab-separated fields in a genus line
pub const GENUS_FIELDS: usize = 3;

/// One line of a genus file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenusLine {
    /// First whitespace token of the genus field, lower-cased
    pub genus: String,
    pub taxa: Vec<TaxonId>,
}

/// Parse genus file text
///
/// Lines whose genus field is blank are skipped.
///
/// # Errors
///
/// Returns `ParseError::TooFewFields` if a line has fewer than 3 fields.
pub fn parse_genus_text(text: &str, source_name: &str) -> Result<Vec<GenusLine>, ParseError> {
    let mut genera = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < GENUS_FIELDS {
            return Err(ParseError::TooFewFields {
                source_name: source_name.to_string(),
                line: i + 1,
                expected: GENUS_FIELDS,
                found: fields.len(),
            });
        }

        let Some(genus) = fields[1].split_whitespace().next() else {
            continue;
        };

        genera.push(GenusLine {
            genus: genus.to_lowercase(),
            taxa: split_multi(fields[2].trim()).map(TaxonId::new).collect(),
        });
    }

    Ok(genera)
}
