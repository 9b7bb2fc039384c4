use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::ReferenceCatalog;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct DatasetsArgs {
    /// Directory holding the `<dataset>_node_dict.txt` and `<dataset>_genus_dict.txt` files
    #[arg(long, required = true)]
    pub index_dir: PathBuf,
}

/// Execute datasets subcommand
///
/// # Errors
///
/// Returns an error if the index cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DatasetsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = ReferenceCatalog::load_dir(&args.index_dir)?;

    if verbose {
        eprintln!("Loaded {} datasets", catalog.len());
    }

    match format {
        OutputFormat::Text => {
            let name_width = catalog
                .names()
                .map(|name| name.as_str().len())
                .max()
                .unwrap_or(7)
                .max(7);

            println!("Reference Index ({} datasets)\n", catalog.len());
            println!(
                "{:<name_width$}  {:>10}  {:>10}  {:>8}",
                "Dataset", "Taxa", "Names", "Genera"
            );
            println!("{}", "-".repeat(name_width + 36));
            for dataset in catalog.datasets() {
                println!(
                    "{:<name_width$}  {:>10}  {:>10}  {:>8}",
                    dataset.name.as_str(),
                    dataset.len(),
                    dataset.name_count(),
                    dataset.genus_count(),
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = catalog
                .datasets()
                .iter()
                .map(|dataset| {
                    serde_json::json!({
                        "dataset": dataset.name,
                        "taxa": dataset.len(),
                        "names": dataset.name_count(),
                        "genera": dataset.genus_count(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("dataset\ttaxa\tnames\tgenera");
            for dataset in catalog.datasets() {
                println!(
                    "{}\t{}\t{}\t{}",
                    dataset.name,
                    dataset.len(),
                    dataset.name_count(),
                    dataset.genus_count(),
                );
            }
        }
    }

    Ok(())
}
