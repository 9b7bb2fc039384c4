//! Stage 1: exact lookup of the raw name, its qualifier-stripped form and its
//! genus token, followed by one round of cross-dataset synonym recursion.

use std::collections::BTreeSet;

use crate::catalog::store::ReferenceCatalog;
use crate::core::types::StatusCode;
use crate::matching::result::{lookup_names, recursion_names, DatasetMatch, MatchTable};
use crate::normalize::strip_qualifiers;

/// Exact, corrected and genus-only lookup of `input` in every dataset
#[must_use]
pub fn bare_match(catalog: &ReferenceCatalog, input: &str) -> MatchTable {
    let datasets = catalog.datasets();
    let mut table = MatchTable::unmapped(datasets.len());

    let target = input.to_lowercase();
    let Some(genus) = target.split_whitespace().next() else {
        return table;
    };
    let corrected = strip_qualifiers(&target);
    let use_corrected = !corrected.flags.dropout;

    for (i, dataset) in datasets.iter().enumerate() {
        if let Some(ids) = dataset.lookup(&target) {
            table.set(i, DatasetMatch::new(ids.to_vec(), StatusCode::EXACT));
        } else if let Some(ids) = dataset
            .lookup(&corrected.text)
            .filter(|_| use_corrected)
        {
            table.set(i, DatasetMatch::new(ids.to_vec(), StatusCode::CORRECTED));
        } else if let Some(ids) = dataset.lookup(genus) {
            table.set(i, DatasetMatch::new(ids.to_vec(), StatusCode::PARTIAL));
        }
    }

    if table.any_confident() {
        // Exact hits only; recursive hits from this round never seed further lookups
        let mut names = BTreeSet::new();
        for (i, dataset) in datasets.iter().enumerate() {
            let status = table.status(i);
            if status == StatusCode::EXACT || status == StatusCode::CORRECTED {
                names.extend(recursion_names(dataset, &table[i].ids));
            }
        }

        for (i, dataset) in datasets.iter().enumerate() {
            if table.status(i).is_confident() {
                continue;
            }
            let ids = lookup_names(dataset, &names);
            if !ids.is_empty() {
                table.set(i, DatasetMatch::new(ids, StatusCode::RECURSIVE));
            }
        }
    }

    for (i, dataset) in datasets.iter().enumerate() {
        let entry = &table[i];
        let status = entry.status;

        let demoted = match entry.ids.as_slice() {
            [id] => {
                let key = if status == StatusCode::EXACT {
                    Some(&target)
                } else if status == StatusCode::CORRECTED {
                    Some(&corrected.text)
                } else {
                    None
                };
                // A single hit reached through a synonym rather than the canonical name
                key.zip(dataset.record(id))
                    .filter(|(key, record)| {
                        record.canonical_lower() != **key && record.has_synonym(key)
                    })
                    .map(|_| StatusCode(status.code() + 1))
            }
            [_, _, ..] if status.is_confident() => Some(StatusCode(status.code() + 2)),
            _ => None,
        };

        if let Some(status) = demoted {
            let ids = table[i].ids.clone();
            table.set(i, DatasetMatch { ids, status });
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TaxonId;

    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::from_texts(&[
            (
                "gbif",
                "2436436\tHomo sapiens\t\tspecies\t2436436|2436435|1\t8|7\n\
                 2436435\tHomo\t\tgenus\t2436435|1\t7\n",
                "0\tHomo\t2436435|2436436\n",
            ),
            (
                "ncbi",
                "9606\tHomo sapiens\thuman|Homo sapiens sapiens\tspecies\t9606|9605|1\t8|7\n\
                 9605\tHomo\t\tgenus\t9605|1\t7\n\
                 10090\tMus musculus\tmouse\tspecies\t10090|10088|1\t8|7\n\
                 10091\tMus castaneus\tmouse\tspecies\t10091|10088|1\t8|7\n\
                 10088\tMus\t\tgenus\t10088|1\t7\n",
                "0\tHomo\t9605|9606\n1\tMus\t10088|10090|10091\n",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_match_everywhere() {
        let table = bare_match(&catalog(), "Homo sapiens");
        assert_eq!(table[0].status, StatusCode::EXACT);
        assert_eq!(table[0].ids, vec![TaxonId::new("2436436")]);
        assert_eq!(table[1].status, StatusCode::EXACT);
        assert_eq!(table[1].ids, vec![TaxonId::new("9606")]);
    }

    #[test]
    fn test_synonym_hit_demoted_and_recursed() {
        let table = bare_match(&catalog(), "Human");
        assert_eq!(table[1].status, StatusCode::EXACT_SYNONYM);
        assert_eq!(table[1].ids, vec![TaxonId::new("9606")]);
        // gbif only knows the canonical name
        assert_eq!(table[0].status, StatusCode::RECURSIVE);
        assert_eq!(table[0].ids, vec![TaxonId::new("2436436")]);
    }

    #[test]
    fn test_corrected_match() {
        let table = bare_match(&catalog(), "Homo sapiens sp.");
        assert_eq!(table[1].status, StatusCode::CORRECTED);
    }

    #[test]
    fn test_dropout_qualifier_blocks_correction() {
        let table = bare_match(&catalog(), "Homo cf. sapiens");
        assert_eq!(table[1].status, StatusCode::PARTIAL);
        assert_eq!(table[1].ids, vec![TaxonId::new("9605")]);
    }

    #[test]
    fn test_homonyms_demoted() {
        let table = bare_match(&catalog(), "mouse");
        assert_eq!(table[1].status, StatusCode::EXACT_MULTIPLE);
        assert_eq!(table[1].ids.len(), 2);
        assert!(table[0].is_unmapped());
    }

    #[test]
    fn test_blank_input_is_unmapped() {
        let table = bare_match(&catalog(), "   ");
        assert!(table.iter().all(DatasetMatch::is_unmapped));
    }
}
