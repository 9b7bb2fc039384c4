//! # taxon-solver
//!
//! A library for resolving free-text organism names against reference
//! taxonomies (NCBI Taxonomy, GBIF, Catalogue of Life, Encyclopedia of Life).
//!
//! Names collected from literature, herbal pharmacopoeias or sample sheets are
//! rarely clean: they carry misspellings, qualifiers such as `sp.` or `cf.`,
//! genitive crude-drug Latin ("Radix Ginseng", "Folium Mori Albae") and strain
//! designations. `taxon-solver` runs each name through a fixed sequence of
//! exact, lineage-aware and approximate matching stages and reports, for every
//! dataset, the matched taxon ids together with a status code saying how the
//! match was obtained.
//!
//! ## Features
//!
//! - **Exact and synonym lookup**: canonical names, synonyms and qualifier-stripped forms
//! - **Cross-dataset recursion**: a name known to one dataset is carried to the others
//! - **Lineage disambiguation**: ambiguous hits are narrowed using a confident lineage
//! - **Rule screening**: viruses, environmental samples, hybrids and the like are flagged
//! - **Edit-distance correction**: bounded Damerau-Levenshtein on epithets and genera
//! - **Latin respelling**: genitive and plural drug names mapped to nominative forms
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use taxon_solver::{ReferenceCatalog, ResolverConfig, TaxonResolver};
//!
//! // Load every <dataset>_node_dict.txt / <dataset>_genus_dict.txt pair
//! let catalog = ReferenceCatalog::load_dir(Path::new("index")).unwrap();
//!
//! let config = ResolverConfig::new("ncbi", 3).unwrap();
//! let resolver = TaxonResolver::new(&catalog, config).unwrap();
//!
//! let table = resolver.resolve("Homo sapien");
//! for (dataset, entry) in catalog.names().zip(table.iter()) {
//!     println!("{dataset}: {:?} ({})", entry.ids, entry.status.description());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Reference index storage and broad-clade markers
//! - [`core`]: Core data types for taxa, ids and status codes
//! - [`normalize`]: Punctuation, qualifier and Latin normalization
//! - [`matching`]: Resolution pipeline, lineage disambiguation and report rows
//! - [`parsing`]: Readers for index files, name lists and curation tables
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod normalize;
pub mod parsing;

// Re-export commonly used types for convenience
pub use catalog::store::ReferenceCatalog;
pub use core::taxon::TaxonRecord;
pub use core::types::*;
pub use matching::engine::{ResolveError, ResolverConfig, TaxonResolver};
pub use matching::{MatchTable, ResolutionRow};
