//! Stage 7: prefix match, dropping trailing tokens until something is known.

use crate::catalog::store::ReferenceCatalog;
use crate::core::types::StatusCode;
use crate::matching::result::{lookup_names, recursion_names, DatasetMatch, MatchTable};
use crate::normalize::strip_qualifiers;

/// Longest known prefix of `input` (or of its qualifier-stripped form) per
/// dataset, spread to the other datasets by name. Every hit is
/// [`StatusCode::PARTIAL`].
#[must_use]
pub fn partial_match(catalog: &ReferenceCatalog, input: &str) -> MatchTable {
    let datasets = catalog.datasets();
    let mut table = MatchTable::unmapped(datasets.len());

    let target = input.to_lowercase();
    let tokens: Vec<&str> = target.split_whitespace().collect();

    for k in (1..=tokens.len()).rev() {
        let prefix = tokens[..k].join(" ");
        let corrected = strip_qualifiers(&prefix);

        for i in 0..datasets.len() {
            if table.status(i) <= StatusCode::PARTIAL {
                continue;
            }

            let hit = datasets[i].lookup(&prefix).or_else(|| {
                datasets[i]
                    .lookup(&corrected.text)
                    .filter(|_| !corrected.flags.dropout)
            });
            let Some(ids) = hit else {
                continue;
            };
            table.set(i, DatasetMatch::new(ids.to_vec(), StatusCode::PARTIAL));

            let names = recursion_names(&datasets[i], &table[i].ids);
            for (j, other) in datasets.iter().enumerate() {
                if table.status(j) <= StatusCode::PARTIAL {
                    continue;
                }
                let ids = lookup_names(other, &names);
                if !ids.is_empty() {
                    table.set(j, DatasetMatch::new(ids, StatusCode::PARTIAL));
                }
            }
        }
    }

    table
}
