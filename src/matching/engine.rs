use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::catalog::store::ReferenceCatalog;
use crate::core::types::{DatasetId, StatusCode};
use crate::matching::bare::bare_match;
use crate::matching::classify::{finalize, ResolutionRow};
use crate::matching::in_depth::in_depth_match;
use crate::matching::intra_generic::intra_generic_match;
use crate::matching::lineage::disambiguate;
use crate::matching::partial::partial_match;
use crate::matching::result::MatchTable;
use crate::matching::screening::screen;
use crate::normalize::punctuation::split_punctuation;
use crate::normalize::strip_qualifiers;
use crate::parsing::names::CurationTable;

/// Default dataset whose result is reported first
pub const DEFAULT_CHOSEN_DATASET: &str = "ncbi";

/// Default maximum edit distance for approximate matching
pub const DEFAULT_CUTOFF: usize = 3;

/// Chosen dataset status below which lineage disambiguation ends the search
const LINEAGE_DONE: StatusCode = StatusCode(20);

/// Status every dataset must beat for intra-generic correction to end the search
const INTRA_GENERIC_DONE: StatusCode = StatusCode(30);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Unknown reference dataset '{0}'")]
    UnknownDataset(String),

    #[error("Cutoff must be zero or positive, got {0}")]
    NegativeCutoff(i64),
}

/// Configuration for the resolver
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Dataset whose result drives the early exits and the review flag
    pub chosen: DatasetId,
    /// Maximum edit distance; 0 disables the approximate stages
    pub cutoff: usize,
}

impl ResolverConfig {
    /// # Errors
    ///
    /// Returns `ResolveError::NegativeCutoff` if `cutoff` is below zero.
    pub fn new(chosen: impl Into<String>, cutoff: i64) -> Result<Self, ResolveError> {
        let cutoff = usize::try_from(cutoff).map_err(|_| ResolveError::NegativeCutoff(cutoff))?;
        Ok(Self {
            chosen: DatasetId::new(chosen),
            cutoff,
        })
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            chosen: DatasetId::new(DEFAULT_CHOSEN_DATASET),
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

/// The resolution pipeline over a loaded catalog
pub struct TaxonResolver<'a> {
    catalog: &'a ReferenceCatalog,
    config: ResolverConfig,
    /// Position of the chosen dataset in the catalog
    chosen: usize,
    curation: Option<CurationTable>,
}

impl<'a> TaxonResolver<'a> {
    /// # Errors
    ///
    /// Returns `ResolveError::UnknownDataset` if the chosen dataset is not
    /// part of the catalog.
    pub fn new(catalog: &'a ReferenceCatalog, config: ResolverConfig) -> Result<Self, ResolveError> {
        let chosen = catalog
            .position(&config.chosen)
            .ok_or_else(|| ResolveError::UnknownDataset(config.chosen.to_string()))?;

        Ok(Self {
            catalog,
            config,
            chosen,
            curation: None,
        })
    }

    /// Use manually curated replacements during pre-correction
    #[must_use]
    pub fn with_curation(mut self, curation: CurationTable) -> Self {
        self.curation = Some(curation);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &ReferenceCatalog {
        self.catalog
    }

    /// Run the matching stages on an already pre-corrected name.
    ///
    /// Stages run in a fixed order and each one only replaces a dataset's
    /// entry with a more confident one. The search stops early when the
    /// chosen dataset is settled by lineage, when a screening rule fires, or
    /// when intra-generic correction brings every dataset below 30. Partial
    /// matching always runs last, even with a cutoff of 0.
    #[must_use]
    pub fn resolve(&self, name: &str) -> MatchTable {
        let catalog = self.catalog;

        let bare = bare_match(catalog, name);
        let mut table = if bare.any_confident() {
            disambiguate(catalog, &bare)
        } else {
            bare.clone()
        };
        debug!("'{}': bare match, chosen status {}", name, table.status(self.chosen));

        if table.status(self.chosen) < LINEAGE_DONE {
            return table;
        }

        if let Some(status) = screen(name) {
            debug!("'{}': screened as {}", name, status);
            return MatchTable::uniform(catalog.len(), status);
        }

        if self.config.cutoff > 0 {
            let corrected = strip_qualifiers(name).text;

            if bare.has_candidates() {
                let intra = intra_generic_match(catalog, &corrected, self.config.cutoff);
                table.merge_improving(&intra);
                debug!("'{}': intra-generic match, best status {}", name, table.min_status());

                if table.iter().all(|entry| entry.status < INTRA_GENERIC_DONE) {
                    return table;
                }
            }

            let in_depth = in_depth_match(catalog, &corrected, self.config.cutoff);
            table.merge_improving(&in_depth);
            debug!("'{}': in-depth match, best status {}", name, table.min_status());
        }

        table.merge_at_least(&partial_match(catalog, name));
        table
    }

    /// Input as the pipeline sees it: the curated replacement if there is
    /// one, otherwise the punctuation-repaired raw name
    #[must_use]
    pub fn pre_correct(&self, raw: &str) -> String {
        self.curation
            .as_ref()
            .and_then(|curation| curation.lookup(raw))
            .map_or_else(|| split_punctuation(raw), str::to_string)
    }

    /// Resolve one input line into its report row; `order` is 1-based
    #[must_use]
    pub fn resolve_row(&self, order: usize, raw: &str) -> ResolutionRow {
        let pre_corrected = self.pre_correct(raw);
        let mut table = self.resolve(&pre_corrected);
        finalize(self.catalog, raw, &mut table);
        ResolutionRow::new(self.catalog, self.chosen, order, raw, &pre_corrected, &table)
    }

    /// Resolve every line in parallel; rows come back in input order
    #[must_use]
    pub fn resolve_batch(&self, names: &[String]) -> Vec<ResolutionRow> {
        names
            .par_iter()
            .enumerate()
            .map(|(i, raw)| self.resolve_row(i + 1, raw))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ManualReview, TaxonId};

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
                "9606\tHomo sapiens\thuman\tspecies\t9606|9605|9604|33208|1\t8|7|6|2\n\
                 9605\tHomo\t\tgenus\t9605|9604|33208|1\t7|6|2\n\
                 9604\tHominidae\t\tfamily\t9604|33208|1\t6|2\n\
                 33208\tMetazoa\t\tkingdom\t33208|1\t2\n",
                "0\tHomo\t9605|9606\n",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            ResolverConfig::new("ncbi", -1),
            Err(ResolveError::NegativeCutoff(-1))
        ));
        assert_eq!(ResolverConfig::new("ncbi", 0).unwrap().cutoff, 0);

        let default = ResolverConfig::default();
        assert_eq!(default.chosen, DatasetId::new("ncbi"));
        assert_eq!(default.cutoff, DEFAULT_CUTOFF);
    }

    #[test]
    fn test_unknown_chosen_dataset() {
        let catalog = catalog();
        let config = ResolverConfig::new("col", 3).unwrap();
        assert!(matches!(
            TaxonResolver::new(&catalog, config),
            Err(ResolveError::UnknownDataset(name)) if name == "col"
        ));
    }

    #[test]
    fn test_exact_name() {
        let catalog = catalog();
        let resolver = TaxonResolver::new(&catalog, ResolverConfig::default()).unwrap();

        let table = resolver.resolve("Homo sapiens");
        assert_eq!(table[1].status, StatusCode::EXACT);
        assert_eq!(table[1].ids, vec![TaxonId::new("9606")]);
    }

    #[test]
    fn test_misspelled_epithet() {
        let catalog = catalog();
        let resolver = TaxonResolver::new(&catalog, ResolverConfig::default()).unwrap();

        let table = resolver.resolve("Homo sapien");
        assert_eq!(table[1].ids, vec![TaxonId::new("9606")]);
        assert!((20..40).contains(&table[1].status.code()));
    }

    #[test]
    fn test_screened_names_have_no_candidates() {
        let catalog = catalog();
        let resolver = TaxonResolver::new(&catalog, ResolverConfig::default()).unwrap();

        let table = resolver.resolve("uncultured virus");
        assert!(table.iter().all(|entry| entry.ids.is_empty()));
        assert!(table
            .iter()
            .all(|entry| entry.status == StatusCode::SCREEN_UNCLASSIFIED));
    }

    #[test]
    fn test_zero_cutoff_still_runs_partial_match() {
        let catalog = catalog();
        let config = ResolverConfig::new("ncbi", 0).unwrap();
        let resolver = TaxonResolver::new(&catalog, config).unwrap();

        let table = resolver.resolve("Homo sapiens sp. nov. unknownqualifier");
        assert_eq!(table[1].status, StatusCode::PARTIAL);
        assert_eq!(table[1].ids, vec![TaxonId::new("9606")]);
    }

    #[test]
    fn test_curation_replaces_input() {
        let catalog = catalog();
        let curation = CurationTable::from_text("raw_name\treplacement\nMan\tHomo sapiens\n");
        let resolver = TaxonResolver::new(&catalog, ResolverConfig::default())
            .unwrap()
            .with_curation(curation);

        assert_eq!(resolver.pre_correct("man"), "Homo sapiens");
        assert_eq!(resolver.pre_correct("Homo sapiens,L."), "Homo sapiens, L.");

        let row = resolver.resolve_row(1, "man");
        assert_eq!(row.chosen.ids, vec![TaxonId::new("9606")]);
        assert_eq!(row.manual_review, ManualReview::No);
    }

    #[test]
    fn test_batch_keeps_order() {
        let catalog = catalog();
        let resolver = TaxonResolver::new(&catalog, ResolverConfig::default()).unwrap();
        let names: Vec<String> = ["Homo sapiens", "", "Human", "Quercus robur"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = resolver.resolve_batch(&names);
        let orders: Vec<usize> = rows.iter().map(|row| row.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert_eq!(rows[2].raw, "Human");
        assert_eq!(rows[0].chosen.status, StatusCode::EXACT);
        assert_eq!(rows[1].chosen.status, StatusCode::UNMAPPED);
        assert_eq!(rows[2].chosen.status, StatusCode::EXACT_SYNONYM);
        assert_eq!(rows[3].chosen.status, StatusCode::UNMAPPED);
    }
}
