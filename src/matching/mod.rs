//! Name resolution pipeline.
//!
//! - [`TaxonResolver`]: main entry point, runs the stages below in order
//! - [`MatchTable`]: per-dataset candidate ids and status codes
//! - [`ResolutionRow`]: one reported input line
//!
//! ## Stages
//!
//! 1. [`bare::bare_match`]: exact lookup of the raw, corrected and genus-only name
//! 2. [`lineage::disambiguate`]: narrow weak datasets using a confident lineage
//! 3. [`screening::screen`]: keyword rules for names that should stay unresolved
//! 4. approximate stages are skipped when the cutoff is 0
//! 5. [`intra_generic::intra_generic_match`]: fix the specific epithet within a known genus
//! 6. [`in_depth::in_depth_match`]: Latin respellings and genus-wide edit distance
//! 7. [`partial::partial_match`]: longest known prefix
//!
//! A stage only replaces a dataset's entry with a more confident one. Stage 7
//! also accepts equally confident entries.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use taxon_solver::{ReferenceCatalog, ResolverConfig, TaxonResolver};
//!
//! let catalog = ReferenceCatalog::load_dir(Path::new("index")).unwrap();
//! let resolver = TaxonResolver::new(&catalog, ResolverConfig::default()).unwrap();
//!
//! let row = resolver.resolve_row(1, "Homo sapien");
//! println!("{:?} {} ({})", row.chosen.ids, row.chosen.status, row.chosen_description);
//! ```

pub mod bare;
pub mod classify;
pub mod distance;
pub mod engine;
pub mod in_depth;
pub mod intra_generic;
pub mod lineage;
pub mod partial;
pub mod result;
pub mod screening;

pub use classify::{DatasetCall, ResolutionRow};
pub use engine::{ResolveError, ResolverConfig, TaxonResolver};
pub use result::{DatasetMatch, MatchTable};
