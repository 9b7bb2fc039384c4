use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use crate::catalog::index::DatasetIndex;
use crate::core::types::DatasetId;
use crate::parsing::genus::parse_genus_text;
use crate::parsing::nodes::parse_nodes_text;
use crate::parsing::{read_text, ParseError};

/// Suffix of a dataset's node file, after the dataset name
pub const NODE_FILE_SUFFIX: &str = "_node_dict.txt";

/// Suffix of a dataset's genus file, after the dataset name
pub const GENUS_FILE_SUFFIX: &str = "_genus_dict.txt";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse reference index: {0}")]
    Parse(#[from] ParseError),

    #[error("Dataset '{dataset}' is missing its {kind} file ({})", .path.display())]
    MissingFile {
        dataset: String,
        kind: &'static str,
        path: PathBuf,
    },

    #[error("No '*_node_dict.txt' files found in {}", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("Dataset '{0}' is defined more than once")]
    DuplicateDataset(String),

    #[error("Failed to read index directory: {0}")]
    Io(#[from] std::io::Error),
}

/// All loaded reference datasets, sorted by dataset name
#[derive(Debug, Default)]
pub struct ReferenceCatalog {
    datasets: Vec<DatasetIndex>,

    /// Index: dataset name -> position in `datasets`
    name_to_index: HashMap<DatasetId, usize>,
}

impl ReferenceCatalog {
    /// Assemble a catalog from already built datasets
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateDataset` if two datasets share a name.
    pub fn new(mut datasets: Vec<DatasetIndex>) -> Result<Self, CatalogError> {
        datasets.sort_by(|a, b| a.name.cmp(&b.name));

        let mut name_to_index = HashMap::with_capacity(datasets.len());
        for (i, dataset) in datasets.iter().enumerate() {
            if name_to_index.insert(dataset.name.clone(), i).is_some() {
                return Err(CatalogError::DuplicateDataset(dataset.name.to_string()));
            }
        }

        Ok(Self {
            datasets,
            name_to_index,
        })
    }

    /// Load every dataset found in `dir`
    ///
    /// A dataset is any `<name>_node_dict.txt` (or `.txt.gz`) file; its
    /// `<name>_genus_dict.txt` (or `.txt.gz`) companion must exist.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyDirectory` if no node files are found,
    /// `CatalogError::MissingFile` if a genus file is absent, or a parse error
    /// for any malformed file.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let file_name = entry?.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let stem = file_name.strip_suffix(".gz").unwrap_or(file_name);
            if let Some(name) = stem.strip_suffix(NODE_FILE_SUFFIX) {
                if !name.is_empty() && !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }

        if names.is_empty() {
            return Err(CatalogError::EmptyDirectory(dir.to_path_buf()));
        }

        let datasets = names
            .iter()
            .map(|name| Self::load_dataset(dir, name))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(datasets)
    }

    /// Load a single dataset's node and genus files from `dir`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingFile` if either file is absent, or a
    /// parse error for malformed content.
    pub fn load_dataset(dir: &Path, name: &str) -> Result<DatasetIndex, CatalogError> {
        let start = Instant::now();

        let node_path = find_file(dir, name, NODE_FILE_SUFFIX, "node")?;
        let genus_path = find_file(dir, name, GENUS_FILE_SUFFIX, "genus")?;

        let records = parse_nodes_text(&read_text(&node_path)?, &node_path.display().to_string())?;
        let genera = parse_genus_text(
            &read_text(&genus_path)?,
            &genus_path.display().to_string(),
        )?;

        let index = DatasetIndex::build(DatasetId::new(name), records, genera);
        info!(
            "Loaded dataset {}: {} taxa, {} names, {} genera in {:.2?}",
            name,
            index.len(),
            index.name_count(),
            index.genus_count(),
            start.elapsed()
        );

        Ok(index)
    }

    /// Build a catalog from in-memory `(name, node text, genus text)` triples
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed text or
    /// `CatalogError::DuplicateDataset` for repeated names.
    pub fn from_texts(sources: &[(&str, &str, &str)]) -> Result<Self, CatalogError> {
        let datasets = sources
            .iter()
            .map(|&(name, nodes, genera)| {
                let records = parse_nodes_text(nodes, &format!("{name}{NODE_FILE_SUFFIX}"))?;
                let genera = parse_genus_text(genera, &format!("{name}{GENUS_FILE_SUFFIX}"))?;
                Ok(DatasetIndex::build(DatasetId::new(name), records, genera))
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Self::new(datasets)
    }

    #[must_use]
    pub fn dataset(&self, name: &DatasetId) -> Option<&DatasetIndex> {
        self.position(name).map(|i| &self.datasets[i])
    }

    /// Position of a dataset in [`Self::datasets`]
    #[must_use]
    pub fn position(&self, name: &DatasetId) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    #[must_use]
    pub fn datasets(&self) -> &[DatasetIndex] {
        &self.datasets
    }

    pub fn names(&self) -> impl Iterator<Item = &DatasetId> {
        self.datasets.iter().map(|d| &d.name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

/// Locate `<name><suffix>` or its gzipped form
fn find_file(
    dir: &Path,
    name: &str,
    suffix: &str,
    kind: &'static str,
) -> Result<PathBuf, CatalogError> {
    let plain = dir.join(format!("{name}{suffix}"));
    if plain.is_file() {
        return Ok(plain);
    }
    let gzipped = dir.join(format!("{name}{suffix}.gz"));
    if gzipped.is_file() {
        return Ok(gzipped);
    }
    Err(CatalogError::MissingFile {
        dataset: name.to_string(),
        kind,
        path: plain,
    })
}
