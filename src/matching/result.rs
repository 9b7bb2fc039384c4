use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::index::DatasetIndex;
use crate::catalog::store::ReferenceCatalog;
use crate::core::types::{StatusCode, TaxonId};

/// Rounds of cross-dataset synonym propagation
pub const SYNONYM_ROUNDS: usize = 2;

/// Candidate ids and status for one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetMatch {
    /// Sorted, de-duplicated candidate ids
    pub ids: Vec<TaxonId>,
    pub status: StatusCode,
}

impl DatasetMatch {
    pub fn new(mut ids: Vec<TaxonId>, status: StatusCode) -> Self {
        ids.sort();
        ids.dedup();
        Self { ids, status }
    }

    #[must_use]
    pub fn unmapped() -> Self {
        Self {
            ids: Vec::new(),
            status: StatusCode::UNMAPPED,
        }
    }

    #[must_use]
    pub fn is_unmapped(&self) -> bool {
        self.status == StatusCode::UNMAPPED
    }
}

/// One [`DatasetMatch`] per catalog dataset, in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchTable {
    entries: Vec<DatasetMatch>,
}

impl MatchTable {
    #[must_use]
    pub fn unmapped(datasets: usize) -> Self {
        Self {
            entries: vec![DatasetMatch::unmapped(); datasets],
        }
    }

    /// Every dataset set to `status` with no candidates
    #[must_use]
    pub fn uniform(datasets: usize, status: StatusCode) -> Self {
        Self {
            entries: vec![
                DatasetMatch {
                    ids: Vec::new(),
                    status,
                };
                datasets
            ],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[DatasetMatch] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetMatch> {
        self.entries.iter()
    }

    #[must_use]
    pub fn status(&self, position: usize) -> StatusCode {
        self.entries
            .get(position)
            .map_or(StatusCode::UNMAPPED, |entry| entry.status)
    }

    pub fn set(&mut self, position: usize, entry: DatasetMatch) {
        self.entries[position] = entry;
    }

    /// Most confident status across datasets
    #[must_use]
    pub fn min_status(&self) -> StatusCode {
        self.entries
            .iter()
            .map(|entry| entry.status)
            .min()
            .unwrap_or(StatusCode::UNMAPPED)
    }

    #[must_use]
    pub fn any_confident(&self) -> bool {
        self.min_status().is_confident()
    }

    /// True when any dataset holds at least one candidate
    #[must_use]
    pub fn has_candidates(&self) -> bool {
        self.entries.iter().any(|entry| !entry.ids.is_empty())
    }

    /// Take each entry of `other` whose status is strictly more confident
    pub fn merge_improving(&mut self, other: &MatchTable) {
        self.merge_where(other, |new, old| new < old);
    }

    /// Take each entry of `other` whose status is at least as confident
    pub fn merge_at_least(&mut self, other: &MatchTable) {
        self.merge_where(other, |new, old| new <= old);
    }

    fn merge_where(&mut self, other: &MatchTable, accept: impl Fn(StatusCode, StatusCode) -> bool) {
        for (current, candidate) in self.entries.iter_mut().zip(&other.entries) {
            if accept(candidate.status, current.status) {
                *current = candidate.clone();
            }
        }
    }
}

impl std::ops::Index<usize> for MatchTable {
    type Output = DatasetMatch;

    fn index(&self, position: usize) -> &DatasetMatch {
        &self.entries[position]
    }
}

/// Names a candidate set is known by for cross-dataset lookup: each
/// canonical name plus the synonyms contained in it, lower-cased
pub(crate) fn recursion_names(dataset: &DatasetIndex, ids: &[TaxonId]) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for record in ids.iter().filter_map(|id| dataset.record(id)) {
        names.insert(record.canonical_lower());
        for synonym in &record.synonyms {
            if !synonym.is_empty() && record.canonical_name.contains(synonym.as_str()) {
                names.insert(synonym.to_lowercase());
            }
        }
    }
    names.retain(|name| !name.is_empty());
    names
}

/// Every id in `dataset` bearing one of `names`
pub(crate) fn lookup_names<'a>(
    dataset: &DatasetIndex,
    names: impl IntoIterator<Item = &'a String>,
) -> Vec<TaxonId> {
    let mut ids: Vec<TaxonId> = names
        .into_iter()
        .filter_map(|name| dataset.lookup(name))
        .flatten()
        .cloned()
        .collect();
    ids.sort();
    ids.dedup();
    ids
}

/// Fill unconfident datasets from the names of confident ones
///
/// Round one seeds from every dataset below 10; each later round seeds only
/// from the datasets filled in the round before. Filled datasets get
/// [`StatusCode::RECURSIVE`].
pub fn propagate_synonyms(catalog: &ReferenceCatalog, table: &mut MatchTable) {
    let datasets = catalog.datasets();
    let mut seeds: Vec<usize> = (0..table.len())
        .filter(|&i| table.status(i).is_confident())
        .collect();

    for _ in 0..SYNONYM_ROUNDS {
        if seeds.is_empty() {
            break;
        }

        let mut names = BTreeSet::new();
        for &seed in &seeds {
            names.extend(recursion_names(&datasets[seed], &table[seed].ids));
        }

        let mut filled = Vec::new();
        for (i, dataset) in datasets.iter().enumerate() {
            if table.status(i).is_confident() {
                continue;
            }
            let ids = lookup_names(dataset, &names);
            if !ids.is_empty() {
                table.set(i, DatasetMatch::new(ids, StatusCode::RECURSIVE));
                filled.push(i);
            }
        }
        seeds = filled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ids: &[&str], status: u16) -> DatasetMatch {
        DatasetMatch::new(ids.iter().map(|id| TaxonId::new(*id)).collect(), StatusCode(status))
    }

    #[test]
    fn test_dataset_match_sorts_ids() {
        let m = entry(&["9606", "10090", "9606"], 2);
        assert_eq!(m.ids, vec![TaxonId::new("10090"), TaxonId::new("9606")]);
    }

    #[test]
    fn test_merge_improving_is_strict() {
        let mut table = MatchTable::unmapped(3);
        table.set(0, entry(&["a"], 3));
        table.set(1, entry(&["b"], 20));

        let mut other = MatchTable::unmapped(3);
        other.set(0, entry(&["c"], 3));
        other.set(1, entry(&["d"], 10));
        other.set(2, entry(&["e"], 100));

        table.merge_improving(&other);
        assert_eq!(table[0], entry(&["a"], 3));
        assert_eq!(table[1], entry(&["d"], 10));
        assert_eq!(table[2], entry(&["e"], 100));
    }

    #[test]
    fn test_merge_at_least_replaces_ties() {
        let mut table = MatchTable::unmapped(1);
        table.set(0, entry(&["9605"], 100));
        let mut other = MatchTable::unmapped(1);
        other.set(0, entry(&["9606"], 100));

        table.merge_at_least(&other);
        assert_eq!(table[0].ids, vec![TaxonId::new("9606")]);
    }

    #[test]
    fn test_min_status_and_candidates() {
        let mut table = MatchTable::unmapped(2);
        assert_eq!(table.min_status(), StatusCode::UNMAPPED);
        assert!(!table.has_candidates());
        assert!(!table.any_confident());

        table.set(1, entry(&["x"], 6));
        assert_eq!(table.min_status(), StatusCode::RECURSIVE);
        assert!(table.has_candidates());
        assert!(table.any_confident());
        assert_eq!(MatchTable::uniform(2, StatusCode(91)).status(1), StatusCode(91));
    }

    #[test]
    fn test_propagate_synonyms() {
        let catalog = ReferenceCatalog::from_texts(&[
            (
                "gbif",
                "2436436\tHomo sapiens\t\tspecies\t2436436|1\t8\n",
                "0\tHomo\t2436436\n",
            ),
            (
                "ncbi",
                "9606\tHomo sapiens\thuman\tspecies\t9606|1\t8\n",
                "0\tHomo\t9606\n",
            ),
        ])
        .unwrap();

        let mut table = MatchTable::unmapped(2);
        table.set(1, entry(&["9606"], 0));
        propagate_synonyms(&catalog, &mut table);

        assert_eq!(table[0], entry(&["2436436"], 6));
        assert_eq!(table[1], entry(&["9606"], 0));
    }
}
