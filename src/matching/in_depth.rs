//! Stage 6: Latin respelling lookup, then a genus-wide edit-distance search
//! for names whose generic epithet itself is misspelled.

use std::collections::BTreeSet;

use crate::catalog::store::ReferenceCatalog;
use crate::core::types::StatusCode;
use crate::matching::distance::{bounded_edit_distance, frequency_distance, letter_frequency};
use crate::matching::lineage::disambiguate;
use crate::matching::result::{lookup_names, propagate_synonyms, DatasetMatch, MatchTable};
use crate::normalize::latin::latin_variants;

/// Shortest truncated respelling that still counts as a full-name hit
const FULL_NAME_MIN_TOKENS: usize = 3;

/// Resolve `input` through Latin respellings and, failing that, through
/// genera within `cutoff` edits of its first token.
#[must_use]
pub fn in_depth_match(catalog: &ReferenceCatalog, input: &str, cutoff: usize) -> MatchTable {
    let datasets = catalog.datasets();
    let target = input.to_lowercase();
    let tokens: Vec<&str> = target.split_whitespace().collect();
    let variants = latin_variants(&tokens);

    let mut first_block = variants
        .first()
        .and_then(|v| v.split_whitespace().next())
        .or_else(|| tokens.first().copied())
        .unwrap_or_default()
        .to_string();

    let mut table = MatchTable::unmapped(datasets.len());
    for (i, dataset) in datasets.iter().enumerate() {
        if let Some(ids) = variants.iter().find_map(|v| dataset.lookup(v)) {
            table.set(i, DatasetMatch::new(ids.to_vec(), StatusCode::EXACT));
            continue;
        }

        let truncated = variants.iter().find_map(|variant| {
            let words: Vec<&str> = variant.split_whitespace().collect();
            if words.len() < FULL_NAME_MIN_TOKENS {
                return None;
            }
            (2..words.len())
                .rev()
                .find_map(|k| dataset.lookup(&words[..k].join(" ")).map(|ids| (k, ids)))
        });
        if let Some((k, ids)) = truncated {
            let status = if k >= FULL_NAME_MIN_TOKENS {
                StatusCode::EXACT
            } else {
                StatusCode::PARTIAL
            };
            table.set(i, DatasetMatch::new(ids.to_vec(), status));
            continue;
        }

        let genus_hit = variants
            .iter()
            .filter_map(|v| v.split_whitespace().next())
            .find_map(|word| dataset.lookup(word).map(|ids| (word, ids)));
        if let Some((word, ids)) = genus_hit {
            table.set(i, DatasetMatch::new(ids.to_vec(), StatusCode::PARTIAL));
            first_block = word.to_string();
        }
    }

    if !input.chars().any(|c| c.is_ascii_digit()) {
        let unresolved = table.iter().any(|entry| entry.status.code() > 10);
        let multi_word = variants
            .first()
            .is_some_and(|v| v.split_whitespace().count() > 1);
        if unresolved && multi_word {
            genus_wide_search(catalog, &target, &variants[0], &first_block, cutoff, &mut table);
        }
        propagate_synonyms(catalog, &mut table);
    }

    if !table.any_confident() {
        return MatchTable::unmapped(datasets.len());
    }

    let lineage = disambiguate(catalog, &table);
    let mut result = MatchTable::unmapped(datasets.len());
    for (i, entry) in table.iter().enumerate() {
        let ids = entry.ids.clone();
        let single = ids.len() == 1;
        let recoded = match entry.status.code() {
            0 => DatasetMatch::new(ids, StatusCode::LATIN_SINGLE),
            1 => DatasetMatch::new(ids, StatusCode::LATIN_NEAREST),
            3 if single => DatasetMatch::new(ids, StatusCode::GENERIC_SINGLE),
            3 => DatasetMatch::new(ids, StatusCode::GENERIC_MULTIPLE),
            6 if single => DatasetMatch::new(ids, StatusCode::GENERIC_RECURSIVE),
            6 => DatasetMatch::new(ids, StatusCode::GENERIC_RECURSIVE_MULTIPLE),
            _ if lineage.status(i).code() < 20 => {
                DatasetMatch::new(lineage[i].ids.clone(), StatusCode::GENERIC_NEAREST)
            }
            code if code < StatusCode::UNMAPPED.code() => {
                DatasetMatch::new(ids, StatusCode::PARTIAL)
            }
            _ => DatasetMatch::unmapped(),
        };
        result.set(i, recoded);
    }

    result
}

/// Fill unresolved datasets with the names closest to `target` among every
/// genus within `cutoff` edits of `first_block`
fn genus_wide_search(
    catalog: &ReferenceCatalog,
    target: &str,
    primary_variant: &str,
    first_block: &str,
    cutoff: usize,
    table: &mut MatchTable,
) {
    let datasets = catalog.datasets();
    let first_len = first_block.chars().count();
    let first_signature = letter_frequency(first_block);
    let genus_limit = cutoff.min(first_len / 3);

    let genera: BTreeSet<&str> = datasets
        .iter()
        .flat_map(|dataset| dataset.genera())
        .filter(|(genus, entry)| {
            genus.chars().count().abs_diff(first_len) < cutoff
                && frequency_distance(&entry.signature, &first_signature) <= cutoff
                && bounded_edit_distance(genus, first_block, cutoff) <= genus_limit
        })
        .map(|(genus, _)| genus)
        .collect();

    let mut names: BTreeSet<String> = BTreeSet::new();
    for dataset in datasets {
        for &genus in &genera {
            let Some(entry) = dataset.genus(genus) else {
                continue;
            };
            for record in entry.taxa.iter().filter_map(|id| dataset.record(id)) {
                let canonical = record.canonical_lower();
                if canonical.contains(genus) {
                    names.insert(canonical);
                }
                names.extend(
                    record
                        .synonyms
                        .iter()
                        .map(|s| s.to_lowercase())
                        .filter(|s| s.contains(genus)),
                );
            }
        }
    }

    let scored: Vec<(String, usize)> = names
        .into_iter()
        .filter_map(|name| {
            let len = name.chars().count();
            let distance = [target, primary_variant]
                .iter()
                .filter(|query| query.chars().count().abs_diff(len) <= cutoff)
                .map(|query| bounded_edit_distance(query, &name, cutoff))
                .filter(|&distance| distance <= cutoff)
                .min()?;
            Some((name, distance))
        })
        .collect();

    let Some(best) = scored.iter().map(|&(_, distance)| distance).min() else {
        return;
    };
    let best_names: Vec<String> = scored
        .into_iter()
        .filter(|&(_, distance)| distance == best)
        .map(|(name, _)| name)
        .collect();

    for (i, dataset) in datasets.iter().enumerate() {
        if table.status(i).code() <= 10 {
            continue;
        }
        let ids = lookup_names(dataset, &best_names);
        if !ids.is_empty() {
            table.set(i, DatasetMatch::new(ids, StatusCode::CORRECTED));
        }
    }
}
