use crate::core::taxon::TaxonRecord;
use crate::core::types::TaxonId;
use crate::parsing::{split_multi, ParseError};

/// Minimum number of tab-separated fields in a node line
pub const NODE_FIELDS: usize = 6;

/// Parse node file text into taxon records
///
/// `source_name` labels errors (usually the file name).
///
/// # Errors
///
/// Returns `ParseError::TooFewFields` for short lines,
/// `ParseError::InvalidRankCode` for non-numeric rank codes, or
/// `ParseError::InvalidLineage` when the lineage does not start with the
/// record's own id or is not aligned with its rank codes.
pub fn parse_nodes_text(text: &str, source_name: &str) -> Result<Vec<TaxonRecord>, ParseError> {
    let mut records = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() < NODE_FIELDS {
            return Err(ParseError::TooFewFields {
                source_name: source_name.to_string(),
                line: line_num,
                expected: NODE_FIELDS,
                found: fields.len(),
            });
        }

        let id = TaxonId::new(fields[0].trim());
        let lineage_ids: Vec<TaxonId> = split_multi(fields[4]).map(TaxonId::new).collect();
        let mut lineage_rank_codes = split_multi(fields[5])
            .map(|code| {
                code.trim()
                    .parse::<u8>()
                    .map_err(|_| ParseError::InvalidRankCode {
                        source_name: source_name.to_string(),
                        line: line_num,
                        value: code.to_string(),
                    })
            })
            .collect::<Result<Vec<u8>, _>>()?;

        if lineage_ids.first() != Some(&id) {
            return Err(ParseError::InvalidLineage {
                source_name: source_name.to_string(),
                line: line_num,
                message: format!("lineage must start with the record id '{id}'"),
            });
        }

        // Files written with a code for the root itself carry one code too many
        if lineage_rank_codes.len() == lineage_ids.len() {
            lineage_rank_codes.pop();
        }
        if lineage_rank_codes.len() + 1 != lineage_ids.len() {
            return Err(ParseError::InvalidLineage {
                source_name: source_name.to_string(),
                line: line_num,
                message: format!(
                    "{} lineage ids but {} rank codes",
                    lineage_ids.len(),
                    lineage_rank_codes.len()
                ),
            });
        }

        records.push(TaxonRecord {
            id,
            canonical_name: fields[1].trim().to_string(),
            synonyms: split_multi(fields[2]).map(str::to_string).collect(),
            rank: fields[3].trim().to_string(),
            lineage_ids,
            lineage_rank_codes,
        });
    }

    Ok(records)
}
