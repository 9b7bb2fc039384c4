use std::collections::{HashMap, HashSet};

use crate::core::taxon::{GenusEntry, TaxonRecord};
use crate::core::types::{DatasetId, TaxonId};
use crate::matching::distance::letter_frequency;
use crate::normalize::strip_qualifiers;
use crate::parsing::genus::GenusLine;

/// Canonical names with at least this many tokens also get a qualifier-stripped key
const SIMPLIFIED_KEY_MIN_TOKENS: usize = 4;

/// Lookup tables for one reference dataset
///
/// Immutable once built; safe to share across threads.
#[derive(Debug, Clone)]
pub struct DatasetIndex {
    pub name: DatasetId,

    /// Index: taxon id -> record
    records: HashMap<TaxonId, TaxonRecord>,

    /// Index: lower-cased canonical/synonym/simplified name -> taxon ids
    raw_names: HashMap<String, Vec<TaxonId>>,

    /// Index: lower-cased genus token -> signature and taxa
    genera: HashMap<String, GenusEntry>,
}

impl DatasetIndex {
    /// Build the three tables from parsed node and genus lines
    pub fn build(name: DatasetId, records: Vec<TaxonRecord>, genera: Vec<GenusLine>) -> Self {
        let mut raw_names: HashMap<String, Vec<TaxonId>> = HashMap::new();

        // Canonical names first: a synonym that is also some taxon's canonical
        // name is resolved through the canonical key only
        let mut canonical_names: HashSet<String> = HashSet::new();
        for record in &records {
            let key = record.canonical_lower();
            push_unique(raw_names.entry(key.clone()).or_default(), &record.id);
            canonical_names.insert(key);
        }

        for record in &records {
            for synonym in &record.synonyms {
                let key = synonym.to_lowercase();
                if key.is_empty() || canonical_names.contains(&key) {
                    continue;
                }
                push_unique(raw_names.entry(key).or_default(), &record.id);
            }
        }

        // Simplified keys last, never displacing a canonical name or synonym
        for record in &records {
            if let Some(key) = simplified_key(record) {
                raw_names
                    .entry(key)
                    .or_insert_with(|| vec![record.id.clone()]);
            }
        }

        let genera = genera
            .into_iter()
            .map(|line| {
                let entry = GenusEntry {
                    signature: letter_frequency(&line.genus),
                    taxa: line.taxa,
                };
                (line.genus, entry)
            })
            .collect();

        let records = records.into_iter().map(|r| (r.id.clone(), r)).collect();

        Self {
            name,
            records,
            raw_names,
            genera,
        }
    }

    /// Taxa bearing exactly this (lower-cased) name
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&[TaxonId]> {
        self.raw_names.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.raw_names.contains_key(name)
    }

    #[must_use]
    pub fn record(&self, id: &TaxonId) -> Option<&TaxonRecord> {
        self.records.get(id)
    }

    #[must_use]
    pub fn genus(&self, genus: &str) -> Option<&GenusEntry> {
        self.genera.get(genus)
    }

    /// All genus tokens with their entries
    pub fn genera(&self) -> impl Iterator<Item = (&str, &GenusEntry)> {
        self.genera.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of taxon records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct lookup names
    #[must_use]
    pub fn name_count(&self) -> usize {
        self.raw_names.len()
    }

    #[must_use]
    pub fn genus_count(&self) -> usize {
        self.genera.len()
    }
}

fn push_unique(ids: &mut Vec<TaxonId>, id: &TaxonId) {
    if !ids.contains(id) {
        ids.push(id.clone());
    }
}

/// Qualifier-stripped lookup key for long canonical names such as
/// "Bacillus cereus var. mycoides", when exactly one qualifier category
/// (rank qualifiers) was removed and the name is not an "X sp. ..." placeholder
fn simplified_key(record: &TaxonRecord) -> Option<String> {
    let lower = record.canonical_lower();
    let tokens: Vec<&str> = lower.split_whitespace().collect();
    if tokens.len() < SIMPLIFIED_KEY_MIN_TOKENS || tokens[1] == "sp." {
        return None;
    }

    let stripped = strip_qualifiers(&lower);
    if stripped.flags.ignorable && stripped.flags.count() == 1 && !stripped.text.is_empty() {
        Some(stripped.text)
    } else {
        None
    }
}
