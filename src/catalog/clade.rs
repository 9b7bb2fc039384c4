//! Broad-clade markers.
//!
//! Each reference dataset files the top of its tree under its own ids, so the
//! markers are kept per dataset. A marker is a run of consecutive lineage ids;
//! a lineage belongs to the first clade whose marker run occurs anywhere in it.
//!
//! These ids are tied to the dump versions the index files were built from
//! and must be revisited whenever a dataset renumbers its nodes.

use serde::Serialize;

use crate::core::types::{DatasetId, TaxonId};

/// Coarse grouping used to discard candidates from unrelated kingdoms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BroadClade {
    Archaea,
    Bacteria,
    Fungi,
    Metazoa,
    Plant,
    Other,
}

impl std::fmt::Display for BroadClade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Archaea => "Archaea",
            Self::Bacteria => "Bacteria",
            Self::Fungi => "Fungi",
            Self::Metazoa => "Metazoa",
            Self::Plant => "Plant",
            Self::Other => "Other",
        };
        write!(f, "{name}")
    }
}

type MarkerTable = &'static [(BroadClade, &'static [&'static str])];

static COL_MARKERS: MarkerTable = &[
    (BroadClade::Archaea, &["R"]),
    (BroadClade::Bacteria, &["B6LM6"]),
    (BroadClade::Fungi, &["F"]),
    (BroadClade::Metazoa, &["N"]),
    (BroadClade::Plant, &["P"]),
];

static EOL_MARKERS: MarkerTable = &[
    (BroadClade::Archaea, &["EOL-000000024748"]),
    (BroadClade::Bacteria, &["EOL-000000000003"]),
    (BroadClade::Fungi, &["EOL-000002172573"]),
    (BroadClade::Metazoa, &["EOL-000000541397"]),
    (BroadClade::Plant, &["EOL-000000097815"]),
];

static GBIF_MARKERS: MarkerTable = &[
    (BroadClade::Archaea, &["2", "-"]),
    (BroadClade::Bacteria, &["3"]),
    (BroadClade::Fungi, &["5"]),
    (BroadClade::Metazoa, &["1"]),
    (BroadClade::Plant, &["6"]),
];

static NCBI_MARKERS: MarkerTable = &[
    (BroadClade::Archaea, &["2157"]),
    (BroadClade::Bacteria, &["2", "131567"]),
    (BroadClade::Fungi, &["4751"]),
    (BroadClade::Metazoa, &["33208"]),
    (BroadClade::Plant, &["33090"]),
];

/// Scan order for datasets without a table of their own
static ALL_MARKERS: &[MarkerTable] = &[COL_MARKERS, EOL_MARKERS, GBIF_MARKERS, NCBI_MARKERS];

fn markers_for(dataset: &DatasetId) -> &'static [MarkerTable] {
    match dataset.as_str() {
        "col" => &ALL_MARKERS[0..1],
        "eol" => &ALL_MARKERS[1..2],
        "gbif" => &ALL_MARKERS[2..3],
        "ncbi" => &ALL_MARKERS[3..4],
        _ => ALL_MARKERS,
    }
}

/// Broad clade of a lineage (self first, root last) in `dataset`
#[must_use]
pub fn classify(dataset: &DatasetId, lineage: &[TaxonId]) -> BroadClade {
    for table in markers_for(dataset) {
        for &(clade, run) in *table {
            if contains_run(lineage, run) {
                return clade;
            }
        }
    }
    BroadClade::Other
}

fn contains_run(lineage: &[TaxonId], run: &[&str]) -> bool {
    lineage.windows(run.len()).any(|window| {
        window
            .iter()
            .zip(run)
            .all(|(id, marker)| id.as_str() == *marker)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lineage(ids: &[&str]) -> Vec<TaxonId> {
        ids.iter().map(|id| TaxonId::new(*id)).collect()
    }

    #[test]
    fn test_ncbi_clades() {
        let ncbi = DatasetId::new("ncbi");
        let human = lineage(&["9606", "9605", "9604", "33208", "2759", "131567", "1"]);
        assert_eq!(classify(&ncbi, &human), BroadClade::Metazoa);

        let e_coli = lineage(&["562", "561", "1224", "2", "131567", "1"]);
        assert_eq!(classify(&ncbi, &e_coli), BroadClade::Bacteria);

        // "2" alone is not the bacterial marker run
        let odd = lineage(&["10", "2", "1"]);
        assert_eq!(classify(&ncbi, &odd), BroadClade::Other);
    }

    #[test]
    fn test_markers_are_per_dataset() {
        // "1" marks Metazoa in gbif but is the root everywhere in ncbi
        let ids = lineage(&["5219", "1"]);
        assert_eq!(classify(&DatasetId::new("gbif"), &ids), BroadClade::Metazoa);
        assert_eq!(classify(&DatasetId::new("ncbi"), &ids), BroadClade::Other);
    }

    #[test]
    fn test_unknown_dataset_scans_every_table() {
        let ids = lineage(&["x1", "P", "root"]);
        assert_eq!(classify(&DatasetId::new("local"), &ids), BroadClade::Plant);
        assert_eq!(BroadClade::Plant.to_string(), "Plant");
    }
}
