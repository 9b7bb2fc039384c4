//! Stage 5: edit-distance correction of the specific epithet within a genus
//! that is already known.

use std::collections::BTreeSet;

use crate::catalog::index::DatasetIndex;
use crate::catalog::store::ReferenceCatalog;
use crate::core::types::{StatusCode, TaxonId};
use crate::matching::bare::bare_match;
use crate::matching::distance::bounded_edit_distance;
use crate::matching::lineage::disambiguate;
use crate::matching::result::{DatasetMatch, MatchTable};

/// Characters of the candidate's second token compared against the input's
const EPITHET_FRAGMENT_END: usize = 5;

/// Correct `input` against names of the genus it starts with.
///
/// The longest leading run of tokens known to any dataset anchors the
/// search. Inputs containing a digit (strain designations) are only matched
/// down to that anchor and reported as [`StatusCode::EPITHET_STRAIN`].
#[must_use]
pub fn intra_generic_match(catalog: &ReferenceCatalog, input: &str, cutoff: usize) -> MatchTable {
    let datasets = catalog.datasets();
    let unmapped = MatchTable::unmapped(datasets.len());

    let target = input.to_lowercase();
    let blocks: Vec<&str> = target.split_whitespace().collect();
    let Some(&first) = blocks.first() else {
        return unmapped;
    };
    let second = blocks.get(1).copied().unwrap_or("");

    let Some(anchor) = (1..=blocks.len())
        .rev()
        .map(|k| blocks[..k].join(" "))
        .find(|prefix| datasets.iter().any(|d| d.contains_name(prefix)))
    else {
        return unmapped;
    };
    let anchor_blocks: Vec<&str> = anchor.split(' ').collect();

    if input.chars().any(|c| c.is_ascii_digit()) {
        return strain_match(datasets, &anchor_blocks);
    }

    let candidates: BTreeSet<String> = datasets
        .iter()
        .flat_map(|dataset| genus_names(dataset, &anchor, &anchor_blocks, second))
        .collect();

    // Accept only edits well inside the epithet part of the name
    let input_len = target.chars().count();
    let epithet_len = input_len.saturating_sub(first.chars().count());

    let scored: Vec<(String, i64)> = candidates
        .into_iter()
        .filter(|name| name.chars().count().abs_diff(input_len) <= cutoff)
        .filter_map(|name| {
            let distance = bounded_edit_distance(&target, &name, cutoff);
            if distance > cutoff || 3 * distance >= epithet_len {
                return None;
            }
            let score = if target.contains(name.as_str()) || name.contains(target.as_str()) {
                (distance as i64 - 1).min(0)
            } else {
                distance as i64
            };
            Some((name, score))
        })
        .collect();

    let Some(best) = scored.iter().map(|&(_, score)| score).min() else {
        return unmapped;
    };

    let tables: Vec<MatchTable> = scored
        .iter()
        .filter(|&&(_, score)| score == best)
        .map(|(name, _)| bare_match(catalog, name))
        .collect();
    let combined = best_of(&tables, datasets.len());

    if !combined.any_confident() {
        return unmapped;
    }

    let lineage = disambiguate(catalog, &combined);
    let mut result = MatchTable::unmapped(datasets.len());
    for i in 0..datasets.len() {
        let ids = combined[i].ids.clone();
        let entry = match combined.status(i).code() {
            0 | 1 | 3 | 4 => DatasetMatch::new(ids, StatusCode::EPITHET_SINGLE),
            2 | 5 => DatasetMatch::new(ids, StatusCode::EPITHET_MULTIPLE),
            6 => DatasetMatch::new(ids, StatusCode::EPITHET_RECURSIVE),
            8 => DatasetMatch::new(ids, StatusCode::EPITHET_RECURSIVE_MULTIPLE),
            _ if lineage.status(i).code() < 20 => {
                DatasetMatch::new(lineage[i].ids.clone(), StatusCode::EPITHET_NEAREST)
            }
            _ => DatasetMatch::unmapped(),
        };
        result.set(i, entry);
    }

    result
}

/// Per dataset, the longest prefix of the anchor that it knows
fn strain_match(datasets: &[DatasetIndex], anchor_blocks: &[&str]) -> MatchTable {
    let mut table = MatchTable::unmapped(datasets.len());
    for (i, dataset) in datasets.iter().enumerate() {
        let hit = (1..=anchor_blocks.len())
            .rev()
            .find_map(|k| dataset.lookup(&anchor_blocks[..k].join(" ")));
        if let Some(ids) = hit {
            table.set(i, DatasetMatch::new(ids.to_vec(), StatusCode::EPITHET_STRAIN));
        }
    }
    table
}

/// Canonical names and synonyms filed under the anchor's genus that could be
/// respellings of the input
fn genus_names(
    dataset: &DatasetIndex,
    anchor: &str,
    anchor_blocks: &[&str],
    second: &str,
) -> Vec<String> {
    let Some(entry) = dataset.genus(anchor_blocks[0]) else {
        return Vec::new();
    };

    let records = entry.taxa.iter().filter_map(|id| dataset.record(id));
    let mut names = Vec::new();

    for record in records {
        let canonical = record.canonical_lower();
        if anchor_blocks.len() >= 2 {
            let synonyms = record.synonyms.join("|").to_lowercase();
            if !canonical.contains(anchor) && !synonyms.contains(anchor) {
                continue;
            }
        }

        let tokens: Vec<&str> = canonical.split_whitespace().collect();
        if tokens.len() >= anchor_blocks.len()
            && plausible(&tokens, &canonical, anchor, anchor_blocks, second)
        {
            names.push(canonical.clone());
        }

        for synonym in record.synonyms.iter().map(|s| s.to_lowercase()) {
            let tokens: Vec<&str> = synonym.split_whitespace().collect();
            if tokens.len() == anchor_blocks.len()
                && plausible(&tokens, &synonym, anchor, anchor_blocks, second)
            {
                names.push(synonym.clone());
            }
        }
    }

    names
}

fn plausible(
    tokens: &[&str],
    name: &str,
    anchor: &str,
    anchor_blocks: &[&str],
    second: &str,
) -> bool {
    tokens.first() == anchor_blocks.first()
        && name.contains(anchor)
        && (second.is_empty() || tokens.len() < 2 || epithet_resembles(tokens[1], second))
}

/// Same initial, or the epithet's letters 2-5 appear in the input's second token
fn epithet_resembles(epithet: &str, second: &str) -> bool {
    if epithet.chars().next() == second.chars().next() {
        return true;
    }
    let end = epithet.chars().count().min(EPITHET_FRAGMENT_END);
    let fragment: String = epithet.chars().take(end).skip(1).collect();
    second.contains(fragment.as_str())
}

/// Lowest status per dataset across `tables`, with the union of the ids of
/// every table reaching it
fn best_of(tables: &[MatchTable], datasets: usize) -> MatchTable {
    let mut combined = MatchTable::unmapped(datasets);
    for i in 0..datasets {
        let Some(status) = tables.iter().map(|t| t.status(i)).min() else {
            continue;
        };
        let ids: Vec<TaxonId> = tables
            .iter()
            .filter(|t| t.status(i) == status)
            .flat_map(|t| t[i].ids.iter().cloned())
            .collect();
        combined.set(i, DatasetMatch::new(ids, status));
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::from_texts(&[(
            "ncbi",
            "9606\tHomo sapiens\thuman\tspecies\t9606|9605|1\t8|7\n\
             9605\tHomo\t\tgenus\t9605|1\t7\n\
             1000\tHomo erectus\t\tspecies\t1000|9605|1\t8|7\n\
             562\tEscherichia coli\t\tspecies\t562|561|1\t8|7\n\
             561\tEscherichia\t\tgenus\t561|1\t7\n",
            "0\tHomo\t9605|9606|1000\n1\tEscherichia\t561|562\n",
        )])
        .unwrap()
    }

    #[test]
    fn test_single_deletion_corrected() {
        let table = intra_generic_match(&catalog(), "homo sapien", 3);
        assert_eq!(table[0].status, StatusCode::EPITHET_SINGLE);
        assert_eq!(table[0].ids, vec![TaxonId::new("9606")]);
    }

    #[test]
    fn test_transposition_corrected() {
        let table = intra_generic_match(&catalog(), "homo sapeins", 3);
        assert_eq!(table[0].status, StatusCode::EPITHET_SINGLE);
        assert_eq!(table[0].ids, vec![TaxonId::new("9606")]);
    }

    #[test]
    fn test_strain_designation() {
        let table = intra_generic_match(&catalog(), "escherichia coli k12", 3);
        assert_eq!(table[0].status, StatusCode::EPITHET_STRAIN);
        assert_eq!(table[0].ids, vec![TaxonId::new("562")]);
    }

    #[test]
    fn test_unknown_genus_unmapped() {
        let table = intra_generic_match(&catalog(), "quercus robur", 3);
        assert!(table[0].is_unmapped());
    }

    #[test]
    fn test_distance_too_large_for_short_epithet() {
        // Three insertions on a four-letter epithet
        let table = intra_generic_match(&catalog(), "homo sapi", 3);
        assert!(table[0].is_unmapped());

        // No epithet filed under the genus resembles "xyz"
        let table = intra_generic_match(&catalog(), "homo xyz", 3);
        assert!(table[0].is_unmapped());
    }

    #[test]
    fn test_epithet_resembles() {
        assert!(epithet_resembles("sapiens", "sapien"));
        assert!(epithet_resembles("sapiens", "xapiens"));
        assert!(!epithet_resembles("erectus", "sapien"));
    }

    #[test]
    fn test_best_of_unions_ties() {
        let mut a = MatchTable::unmapped(1);
        a.set(0, DatasetMatch::new(vec![TaxonId::new("1")], StatusCode::EXACT));
        let mut b = MatchTable::unmapped(1);
        b.set(0, DatasetMatch::new(vec![TaxonId::new("2")], StatusCode::EXACT));
        let mut c = MatchTable::unmapped(1);
        c.set(0, DatasetMatch::new(vec![TaxonId::new("3")], StatusCode::CORRECTED));

        let combined = best_of(&[a, b, c], 1);
        assert_eq!(combined[0].status, StatusCode::EXACT);
        assert_eq!(combined[0].ids, vec![TaxonId::new("1"), TaxonId::new("2")]);
    }
}
