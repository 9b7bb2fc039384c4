//! Lineage disambiguation.
//!
//! Datasets that only reached a weak or ambiguous result are narrowed down
//! using a confidently matched dataset as reference: candidates from a
//! different broad clade are dropped, and the survivors are ranked by how deep
//! their lineage goes and how many ancestor names they share with the
//! reference lineage.

use std::collections::HashSet;

use crate::catalog::clade::{classify, BroadClade};
use crate::catalog::index::DatasetIndex;
use crate::catalog::store::ReferenceCatalog;
use crate::core::taxon::TaxonRecord;
use crate::core::types::{rank, StatusCode, TaxonId};
use crate::matching::result::{DatasetMatch, MatchTable};

/// Datasets below this status may serve as the reference lineage
const REFERENCE_STATUS_LIMIT: u16 = 5;

/// Clade and ancestor names of the first confidently matched lineage
/// carrying a clade marker
struct ReferenceLineage {
    clade: BroadClade,
    names: HashSet<String>,
}

impl ReferenceLineage {
    fn find(catalog: &ReferenceCatalog, table: &MatchTable) -> Self {
        for (i, dataset) in catalog.datasets().iter().enumerate() {
            if table.status(i).code() >= REFERENCE_STATUS_LIMIT {
                continue;
            }
            for record in table[i].ids.iter().filter_map(|id| dataset.record(id)) {
                let clade = classify(&dataset.name, &record.lineage_ids);
                if clade != BroadClade::Other {
                    return Self {
                        clade,
                        names: lineage_names(dataset, record).collect(),
                    };
                }
            }
        }

        Self {
            clade: BroadClade::Other,
            names: HashSet::new(),
        }
    }
}

/// Lower-cased canonical names of every ancestor present in the dataset
fn lineage_names<'a>(
    dataset: &'a DatasetIndex,
    record: &'a TaxonRecord,
) -> impl Iterator<Item = String> + 'a {
    record
        .lineage_ids
        .iter()
        .filter_map(|id| dataset.record(id))
        .map(TaxonRecord::canonical_lower)
}

/// Narrow every dataset at status 10 or above using the lineage of a
/// confidently matched dataset.
///
/// Returns a new table; confident datasets are copied unchanged. A dataset
/// whose candidates are all filtered out keeps its original candidates and
/// status, so a non-empty candidate set never becomes empty.
#[must_use]
pub fn disambiguate(catalog: &ReferenceCatalog, table: &MatchTable) -> MatchTable {
    let reference = ReferenceLineage::find(catalog, table);
    let mut result = table.clone();

    for (i, dataset) in catalog.datasets().iter().enumerate() {
        let entry = &table[i];
        if entry.status.is_confident() {
            continue;
        }

        let records: Vec<&TaxonRecord> = entry
            .ids
            .iter()
            .filter_map(|id| dataset.record(id))
            .collect();

        // (rank, depth) per candidate
        let mut scored: Vec<(&TaxonRecord, u8, usize)> = records
            .iter()
            .filter(|record| classify(&dataset.name, &record.lineage_ids) == reference.clade)
            .map(|record| {
                let depth = lineage_names(dataset, record)
                    .filter(|name| reference.names.contains(name))
                    .count();
                (*record, record.max_rank_code(), depth)
            })
            .collect();

        let best_rank = scored.iter().map(|&(_, r, _)| r).max();
        if best_rank.map_or(true, |r| r < rank::GENUS) {
            scored = records
                .iter()
                .map(|record| (*record, record.max_rank_code(), 0))
                .collect();
        }

        let Some(best_rank) = scored.iter().map(|&(_, r, _)| r).max() else {
            continue;
        };
        let best_depth = scored.iter().map(|&(_, _, d)| d).max().unwrap_or(0);

        let survivors: Vec<TaxonId> = scored
            .iter()
            .filter(|&&(_, r, d)| r == best_rank && d == best_depth)
            .map(|(record, _, _)| record.id.clone())
            .collect();

        if !survivors.is_empty() {
            result.set(
                i,
                DatasetMatch::new(survivors, StatusCode::from_lineage_rank(best_rank)),
            );
        }
    }

    result
}
