use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use itertools::Itertools;

use crate::catalog::store::ReferenceCatalog;
use crate::cli::OutputFormat;
use crate::core::types::ManualReview;
use crate::matching::engine::{ResolverConfig, TaxonResolver, DEFAULT_CHOSEN_DATASET};
use crate::matching::ResolutionRow;
use crate::parsing::names::{read_name_list, CurationTable};

/// Separator for multi-valued report fields
const MULTI_VALUE_SEPARATOR: &str = "|";

#[derive(Args)]
pub struct ResolveArgs {
    /// File with one organism name per line
    #[arg(required = true)]
    pub input: PathBuf,

    /// Directory holding the `<dataset>_node_dict.txt` and `<dataset>_genus_dict.txt` files
    #[arg(long, required = true)]
    pub index_dir: PathBuf,

    /// Dataset whose result is reported first and drives the review flag
    #[arg(short = 'r', long, default_value = DEFAULT_CHOSEN_DATASET)]
    pub reference: String,

    /// Maximum edit distance for approximate matching (0 disables it)
    #[arg(short = 'l', long, default_value = "3", allow_negative_numbers = true)]
    pub cutoff: i64,

    /// Two-column TSV of raw names and their manual replacements
    #[arg(long)]
    pub curation: Option<PathBuf>,
}

/// Execute resolve subcommand
///
/// # Errors
///
/// Returns an error if the index or an input file cannot be read, or the
/// configuration is invalid.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ResolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = ResolverConfig::new(&args.reference, args.cutoff)?;

    let catalog = ReferenceCatalog::load_dir(&args.index_dir)
        .with_context(|| format!("Failed to load index from {}", args.index_dir.display()))?;
    if verbose {
        eprintln!("Loaded {} datasets", catalog.len());
    }

    let mut resolver = TaxonResolver::new(&catalog, config)?;
    if let Some(path) = &args.curation {
        let curation = CurationTable::load(path)?;
        if verbose {
            eprintln!("Loaded {} curated replacements", curation.len());
        }
        resolver = resolver.with_curation(curation);
    }

    let names = read_name_list(&args.input)?;
    let start = Instant::now();
    let rows = resolver.resolve_batch(&names);
    if verbose {
        eprintln!("Resolved {} names in {:.2?}", rows.len(), start.elapsed());
    }

    match format {
        OutputFormat::Text => print_text_results(&rows),
        OutputFormat::Json => print_json_results(&rows)?,
        OutputFormat::Tsv => print_tsv_results(&catalog, &rows),
    }

    Ok(())
}

fn print_text_results(rows: &[ResolutionRow]) {
    for row in rows {
        let review = match row.manual_review {
            ManualReview::No => String::new(),
            other => format!("  [review: {other}]"),
        };
        println!(
            "{:>4}  {}  ->  {} {} [{}] {}{}",
            row.order,
            row.raw,
            row.chosen.dataset,
            row.chosen.ids.iter().join(MULTI_VALUE_SEPARATOR),
            row.chosen.names.join(MULTI_VALUE_SEPARATOR),
            row.chosen.status,
            review,
        );
    }
}

fn print_json_results(rows: &[ResolutionRow]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}

fn print_tsv_results(catalog: &ReferenceCatalog, rows: &[ResolutionRow]) {
    let dataset_columns = catalog
        .names()
        .map(|name| format!("{name}_mapped_ID\t{name}_scientific_name\t{name}_mapping_status_code"))
        .join("\t");

    println!(
        "Input_original_order\tRaw_name_input\tPre_corrected_input\tQualifier_corrected_input\tChosen_reference\tChosen_reference_mapped_ID\tChosen_reference_scientific_name\tChosen_reference_mapping_status_code\tChosen_reference_mapping_status_description\t{dataset_columns}\tManual_curation_recommended"
    );

    for row in rows {
        let datasets = row
            .datasets
            .iter()
            .map(|call| {
                format!(
                    "{}\t{}\t{}",
                    call.ids.iter().join(MULTI_VALUE_SEPARATOR),
                    call.names.join(MULTI_VALUE_SEPARATOR),
                    call.status,
                )
            })
            .join("\t");

        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.order,
            row.raw,
            row.pre_corrected,
            row.qualifier_corrected,
            row.chosen.dataset,
            row.chosen.ids.iter().join(MULTI_VALUE_SEPARATOR),
            row.chosen.names.join(MULTI_VALUE_SEPARATOR),
            row.chosen.status,
            row.chosen_description,
            datasets,
            row.manual_review,
        );
    }
}
