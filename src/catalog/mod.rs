//! In-memory reference index.
//!
//! Each dataset (NCBI, GBIF, Catalogue of Life, EoL, ...) is converted ahead
//! of time into two flat files, `<name>_node_dict.txt` and
//! `<name>_genus_dict.txt`, which are loaded into three lookup tables:
//!
//! - raw names: lower-cased canonical name, synonym or simplified name -> taxon ids
//! - genera: lower-cased genus token -> letter signature and taxon ids
//! - records: taxon id -> [`TaxonRecord`](crate::core::taxon::TaxonRecord)
//!
//! The tables are immutable after loading and can be shared between threads.
//!
//! ## Example
//!
//! ```rust,no_run
//! use taxon_solver::ReferenceCatalog;
//! use taxon_solver::core::types::DatasetId;
//! use std::path::Path;
//!
//! let catalog = ReferenceCatalog::load_dir(Path::new("index/")).unwrap();
//! for dataset in catalog.datasets() {
//!     println!("{}: {} taxa", dataset.name, dataset.len());
//! }
//!
//! let ncbi = catalog.dataset(&DatasetId::new("ncbi"));
//! ```

pub mod clade;
pub mod index;
pub mod store;
