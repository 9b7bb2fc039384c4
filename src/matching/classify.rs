//! Final pass over a resolved row: demotions that need the raw input, and
//! the report record with names, status labels and the review flag.

use serde::Serialize;

use crate::catalog::index::DatasetIndex;
use crate::catalog::store::ReferenceCatalog;
use crate::core::taxon::TaxonRecord;
use crate::core::types::{rank, DatasetId, ManualReview, StatusCode, TaxonId};
use crate::matching::result::{DatasetMatch, MatchTable};
use crate::normalize::strip_qualifiers;

/// Word count up to which a demoted name is treated as "genus species"
const SHORT_NAME_WORDS: usize = 2;

/// Apply the corrections that depend on the raw input.
///
/// When the raw name carries an uncertain-identification marker ("cf.",
/// "aff.", ...), a single approximate match (status 20-99) cannot be trusted
/// at its own rank and is moved up the lineage with
/// [`StatusCode::QUALIFIER_DEMOTED`]. Strain matches are then relabelled
/// [`StatusCode::STRAIN_DEMOTED`].
pub fn finalize(catalog: &ReferenceCatalog, raw: &str, table: &mut MatchTable) {
    let dropout = strip_qualifiers(raw).flags.dropout;
    let words = raw.split_whitespace().count();

    for (i, dataset) in catalog.datasets().iter().enumerate() {
        let entry = &table[i];
        let code = entry.status.code();

        if dropout && (20..100).contains(&code) {
            if let [id] = entry.ids.as_slice() {
                let demoted = dataset
                    .record(id)
                    .and_then(|record| demoted_id(record, words));
                if let Some(id) = demoted {
                    table.set(i, DatasetMatch::new(vec![id], StatusCode::QUALIFIER_DEMOTED));
                }
            }
        }

        if table.status(i) == StatusCode::EPITHET_STRAIN {
            let ids = table[i].ids.clone();
            table.set(i, DatasetMatch::new(ids, StatusCode::STRAIN_DEMOTED));
        }
    }
}

/// Ancestor a qualified match is moved to, if any.
///
/// Names of three or more words keep the candidate itself when its lineage
/// never goes below genus (max rank code <= 7, not the family level 6), so a
/// qualified genus-level hit is not pushed up to its family. Everything else
/// moves to the first ancestor with a non-zero rank code.
fn demoted_id(record: &TaxonRecord, words: usize) -> Option<TaxonId> {
    if words > SHORT_NAME_WORDS && record.max_rank_code() <= rank::GENUS {
        return Some(record.id.clone());
    }
    (1..record.lineage_ids.len())
        .find(|&position| record.rank_code_at(position) >= rank::ROOT)
        .map(|position| record.lineage_ids[position].clone())
}

/// One dataset's part of a report row
#[derive(Debug, Clone, Serialize)]
pub struct DatasetCall {
    pub dataset: DatasetId,
    pub ids: Vec<TaxonId>,
    /// Canonical name per id, same order
    pub names: Vec<String>,
    pub status: StatusCode,
}

impl DatasetCall {
    fn new(dataset: &DatasetIndex, entry: &DatasetMatch) -> Self {
        let names = entry
            .ids
            .iter()
            .map(|id| {
                dataset
                    .record(id)
                    .map(|record| record.canonical_name.clone())
                    .unwrap_or_default()
            })
            .collect();

        Self {
            dataset: dataset.name.clone(),
            ids: entry.ids.clone(),
            names,
            status: entry.status,
        }
    }
}

/// Everything reported for one input line
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionRow {
    /// 1-based position in the input
    pub order: usize,
    pub raw: String,
    pub pre_corrected: String,
    pub qualifier_corrected: String,
    pub chosen: DatasetCall,
    pub chosen_description: &'static str,
    pub datasets: Vec<DatasetCall>,
    pub manual_review: ManualReview,
}

impl ResolutionRow {
    /// Build the report row; `chosen` is the chosen dataset's catalog position
    #[must_use]
    pub fn new(
        catalog: &ReferenceCatalog,
        chosen: usize,
        order: usize,
        raw: &str,
        pre_corrected: &str,
        table: &MatchTable,
    ) -> Self {
        let datasets: Vec<DatasetCall> = catalog
            .datasets()
            .iter()
            .zip(table.iter())
            .map(|(dataset, entry)| DatasetCall::new(dataset, entry))
            .collect();
        let chosen = datasets[chosen].clone();

        Self {
            order,
            raw: raw.to_string(),
            pre_corrected: pre_corrected.to_string(),
            qualifier_corrected: strip_qualifiers(pre_corrected).text,
            chosen_description: chosen.status.description(),
            manual_review: ManualReview::for_status(chosen.status),
            chosen,
            datasets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::from_texts(&[(
            "ncbi",
            "9606\tHomo sapiens\t\tspecies\t9606|9605|9604|1\t8|7|6\n\
             9605\tHomo\t\tgenus\t9605|9604|1\t7|6\n\
             9604\tHominidae\t\tfamily\t9604|1\t6\n\
             1423\tBacillus subtilis\t\tspecies\t1423|1386|1\t8|0\n\
             1386\tBacillus\t\tgenus\t1386|1\t7\n",
            "0\tHomo\t9605|9606\n",
        )])
        .unwrap()
    }

    fn table(ids: &[&str], status: u16) -> MatchTable {
        let mut table = MatchTable::unmapped(1);
        table.set(
            0,
            DatasetMatch::new(ids.iter().map(|id| TaxonId::new(*id)).collect(), StatusCode(status)),
        );
        table
    }

    #[test]
    fn test_short_qualified_name_moves_to_parent() {
        let mut t = table(&["9606"], 20);
        finalize(&catalog(), "Homo cf. sapien", &mut t);
        // Three words, but species level: moves to the first ranked ancestor
        assert_eq!(t[0].ids, vec![TaxonId::new("9605")]);
        assert_eq!(t[0].status, StatusCode::QUALIFIER_DEMOTED);

        let mut t = table(&["9606"], 32);
        finalize(&catalog(), "Hommo aff.", &mut t);
        assert_eq!(t[0].ids, vec![TaxonId::new("9605")]);
    }

    #[test]
    fn test_unranked_parent_skipped() {
        let mut t = table(&["1423"], 20);
        finalize(&catalog(), "Bacillus subtilus cf.", &mut t);
        // 1386 carries rank code 0; there is no ranked ancestor
        assert_eq!(t[0].ids, vec![TaxonId::new("1423")]);
        assert_eq!(t[0].status, StatusCode(20));
    }

    #[test]
    fn test_long_name_above_species_kept() {
        let mut t = table(&["9605"], 24);
        finalize(&catalog(), "Homo cf. sp. indet", &mut t);
        assert_eq!(t[0].ids, vec![TaxonId::new("9605")]);
        assert_eq!(t[0].status, StatusCode::QUALIFIER_DEMOTED);
    }

    #[test]
    fn test_no_qualifier_no_demotion() {
        let mut t = table(&["9606"], 20);
        finalize(&catalog(), "Homo sapien", &mut t);
        assert_eq!(t[0].status, StatusCode::EPITHET_SINGLE);
    }

    #[test]
    fn test_strain_relabelled() {
        let mut t = table(&["1423"], 25);
        finalize(&catalog(), "Bacillus subtilis 168", &mut t);
        assert_eq!(t[0].status, StatusCode::STRAIN_DEMOTED);
    }

    #[test]
    fn test_resolution_row() {
        let catalog = catalog();
        let t = table(&["9606"], 0);
        let row = ResolutionRow::new(&catalog, 0, 1, "Homo sapiens sp.", "Homo sapiens sp.", &t);

        assert_eq!(row.qualifier_corrected, "homo sapiens");
        assert_eq!(row.chosen.names, vec!["Homo sapiens"]);
        assert_eq!(row.chosen_description, "Raw / Exact DB / Canonical match");
        assert_eq!(row.manual_review, ManualReview::No);
        assert_eq!(row.datasets.len(), 1);
    }
}
