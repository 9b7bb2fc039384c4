//! Core data types for taxonomic name resolution.
//!
//! - [`TaxonRecord`]: One taxon of a reference dataset with its lineage
//! - [`GenusEntry`]: Genus-token signature plus the taxa filed under it
//! - [`DatasetId`], [`TaxonId`]: Identifiers
//! - [`StatusCode`], [`ManualReview`]: Result classification types
//!
//! ## Rank codes
//!
//! Lineages carry one integer rank code per ancestor:
//!
//! | Code | Rank    |
//! |------|---------|
//! | 1    | root    |
//! | 2    | kingdom |
//! | 3    | phylum  |
//! | 4    | class   |
//! | 5    | order   |
//! | 6    | family  |
//! | 7    | genus   |
//! | 8    | species |
//! | 0    | unranked |
//!
//! [`TaxonRecord`]: taxon::TaxonRecord
//! [`GenusEntry`]: taxon::GenusEntry
//! [`DatasetId`]: types::DatasetId
//! [`TaxonId`]: types::TaxonId
//! [`StatusCode`]: types::StatusCode
//! [`ManualReview`]: types::ManualReview

pub mod taxon;
pub mod types;
