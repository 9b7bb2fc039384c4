//! Command-line interface for taxon-solver.
//!
//! Available commands:
//!
//! - **resolve**: Resolve a list of organism names against the reference index
//! - **datasets**: List the datasets found in an index directory
//!
//! ## Usage
//!
//! ```text
//! # Resolve names, NCBI as chosen dataset
//! taxon-solver resolve names.txt --index-dir index/
//!
//! # GBIF as chosen dataset, exact matching only, TSV report
//! taxon-solver resolve names.txt --index-dir index/ -r gbif -l 0 --format tsv
//!
//! # Inspect the index
//! taxon-solver datasets --index-dir index/
//! ```

use clap::{Parser, Subcommand};

pub mod datasets;
pub mod resolve;

#[derive(Parser)]
#[command(name = "taxon-solver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Resolve free-text organism names against reference taxonomies")]
#[command(
    long_about = "taxon-solver maps noisy organism names (misspellings, qualifiers, crude-drug Latin) onto taxon ids of several reference taxonomies.\n\nFor each name and each dataset it reports:\n- The matched taxon ids and their scientific names\n- A status code describing how the match was obtained\n- Whether a manual check is recommended"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve organism names from a file
    Resolve(resolve::ResolveArgs),

    /// List the datasets in a reference index
    Datasets(datasets::DatasetsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
