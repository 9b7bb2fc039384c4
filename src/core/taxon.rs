use serde::{Deserialize, Serialize};

use crate::core::types::{rank, TaxonId};

/// Number of bins in a letter-frequency signature: a-z plus "other"
pub const SIGNATURE_BINS: usize = 27;

/// Letter-frequency signature used to prune genus candidates cheaply
pub type LetterSignature = [u32; SIGNATURE_BINS];

/// A single taxon in a reference dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonRecord {
    /// Identifier, unique within the dataset
    pub id: TaxonId,

    /// Accepted scientific name, original case
    pub canonical_name: String,

    /// Alternate names (common names, prior synonyms)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,

    /// Rank label as found in the dump (species, genus, ...)
    pub rank: String,

    /// Ancestor ids from self to root, self first
    pub lineage_ids: Vec<TaxonId>,

    /// Rank code per lineage id, excluding the final root sentinel
    pub lineage_rank_codes: Vec<u8>,
}

impl TaxonRecord {
    pub fn new(id: impl Into<String>, canonical_name: impl Into<String>) -> Self {
        let id = TaxonId::new(id);
        Self {
            lineage_ids: vec![id.clone()],
            id,
            canonical_name: canonical_name.into(),
            synonyms: Vec::new(),
            rank: String::new(),
            lineage_rank_codes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = rank.into();
        self
    }

    #[must_use]
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    /// Set the lineage; `ids` must start with this record's own id
    #[must_use]
    pub fn with_lineage<I, S>(mut self, ids: I, rank_codes: Vec<u8>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lineage_ids = ids.into_iter().map(|s| TaxonId::new(s)).collect();
        self.lineage_rank_codes = rank_codes;
        self
    }

    /// Lower-cased canonical name, the form used for every lookup
    #[must_use]
    pub fn canonical_lower(&self) -> String {
        self.canonical_name.to_lowercase()
    }

    /// Deepest rank reached anywhere on the lineage
    #[must_use]
    pub fn max_rank_code(&self) -> u8 {
        self.lineage_rank_codes
            .iter()
            .copied()
            .max()
            .unwrap_or(rank::UNRANKED)
    }

    /// Rank code of the lineage entry at `position` (0 = self)
    #[must_use]
    pub fn rank_code_at(&self, position: usize) -> u8 {
        self.lineage_rank_codes
            .get(position)
            .copied()
            .unwrap_or(rank::UNRANKED)
    }

    /// True when `name` (already lower-cased) is one of this taxon's synonyms
    #[must_use]
    pub fn has_synonym(&self, name: &str) -> bool {
        self.synonyms.iter().any(|s| s.to_lowercase() == name)
    }
}

/// Genus table entry: signature of the genus token plus the taxa filed under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenusEntry {
    pub signature: LetterSignature,
    pub taxa: Vec<TaxonId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builders() {
        let record = TaxonRecord::new("9606", "Homo sapiens")
            .with_rank("species")
            .with_synonyms(["human"])
            .with_lineage(["9606", "9605", "1"], vec![8, 7]);

        assert_eq!(record.lineage_ids[0], record.id);
        assert_eq!(record.canonical_lower(), "homo sapiens");
        assert_eq!(record.max_rank_code(), 8);
        assert_eq!(record.rank_code_at(1), 7);
        assert_eq!(record.rank_code_at(2), rank::UNRANKED);
        assert!(record.has_synonym("human"));
        assert!(!record.has_synonym("homo"));
    }
}
