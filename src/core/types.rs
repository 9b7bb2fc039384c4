use serde::{Deserialize, Serialize};

/// Name of a reference dataset (e.g. `ncbi`, `gbif`, `col`, `eol`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DatasetId(pub String);

impl DatasetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Taxon identifier, unique within one dataset
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaxonId(pub String);

impl TaxonId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaxonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric rank codes carried in lineage files (0 = unranked)
pub mod rank {
    pub const UNRANKED: u8 = 0;
    pub const ROOT: u8 = 1;
    pub const KINGDOM: u8 = 2;
    pub const FAMILY: u8 = 6;
    pub const GENUS: u8 = 7;
    pub const SPECIES: u8 = 8;
}

/// How a match was obtained. Lower is more confident.
///
/// | Range   | Technique                                         |
/// |---------|---------------------------------------------------|
/// | 0-5     | exact lookup on the raw or qualifier-corrected name |
/// | 6, 8    | synonym propagation from another dataset          |
/// | 10-17   | nearest shared ancestor (`18 - rank code`)        |
/// | 20-24   | specific epithet corrected by edit distance       |
/// | 30-36   | Latin inflection / generic epithet corrected      |
/// | 40, 41  | correction denied, demoted to a higher rank       |
/// | 90-97   | rule-based screening                              |
/// | 100     | partial (prefix) match only                       |
/// | 1000    | unmapped                                          |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const EXACT: Self = Self(0);
    pub const EXACT_SYNONYM: Self = Self(1);
    pub const EXACT_MULTIPLE: Self = Self(2);
    pub const CORRECTED: Self = Self(3);
    pub const CORRECTED_SYNONYM: Self = Self(4);
    pub const CORRECTED_MULTIPLE: Self = Self(5);
    pub const RECURSIVE: Self = Self(6);
    pub const RECURSIVE_MULTIPLE: Self = Self(8);
    pub const LINEAGE_SPECIES: Self = Self(10);
    pub const EPITHET_SINGLE: Self = Self(20);
    pub const EPITHET_MULTIPLE: Self = Self(21);
    pub const EPITHET_RECURSIVE: Self = Self(22);
    pub const EPITHET_RECURSIVE_MULTIPLE: Self = Self(23);
    pub const EPITHET_NEAREST: Self = Self(24);
    pub const EPITHET_STRAIN: Self = Self(25);
    pub const LATIN_SINGLE: Self = Self(30);
    pub const LATIN_NEAREST: Self = Self(31);
    pub const GENERIC_SINGLE: Self = Self(32);
    pub const GENERIC_MULTIPLE: Self = Self(33);
    pub const GENERIC_RECURSIVE: Self = Self(34);
    pub const GENERIC_RECURSIVE_MULTIPLE: Self = Self(35);
    pub const GENERIC_NEAREST: Self = Self(36);
    pub const STRAIN_DEMOTED: Self = Self(40);
    pub const QUALIFIER_DEMOTED: Self = Self(41);
    pub const SCREEN_NON_ORGANISM: Self = Self(90);
    pub const SCREEN_UNCLASSIFIED: Self = Self(91);
    pub const SCREEN_ENVIRONMENTAL: Self = Self(92);
    pub const SCREEN_VIRUS: Self = Self(93);
    pub const SCREEN_PHYTOPLASMA: Self = Self(94);
    pub const SCREEN_SYMBIONT: Self = Self(95);
    pub const SCREEN_HYBRID: Self = Self(96);
    pub const SCREEN_MULTIPLE: Self = Self(97);
    pub const PARTIAL: Self = Self(100);
    pub const UNMAPPED: Self = Self(1000);

    /// Status assigned by a lineage walk whose best candidate carries `rank_code`
    #[must_use]
    pub fn from_lineage_rank(rank_code: u8) -> Self {
        Self(18 - u16::from(rank_code.min(18)))
    }

    #[must_use]
    pub fn code(self) -> u16 {
        self.0
    }

    /// Exact or recursive hit that does not need lineage disambiguation
    #[must_use]
    pub fn is_confident(self) -> bool {
        self.0 < 10
    }

    #[must_use]
    pub fn is_screened(self) -> bool {
        (90..100).contains(&self.0)
    }

    /// Human-readable label for report output.
    ///
    /// Labels follow the historical report table. Two codes that table never
    /// labelled are extensions: 18 (lineage walk ending on an unranked
    /// ancestor) and 25 (strain match before it is relabelled 40).
    #[must_use]
    pub fn description(self) -> &'static str {
        match self.0 {
            0 => "Raw / Exact DB / Canonical match",
            1 => "Raw / Exact DB / Synonym match",
            2 => "Raw / Exact DB / Multiple match",
            3 => "Simple corrected / Exact DB / Canonical match",
            4 => "Simple corrected / Exact DB / Synonym match",
            5 => "Simple corrected / Exact DB / Multiple match",
            6 => "Recursive / Single match",
            8 => "Recursive / Multiple match",
            10 => "Recursive / Nearest match / Species level",
            11 => "Recursive / Nearest match / Genus level",
            12 => "Recursive / Nearest match / Family level",
            13 => "Recursive / Nearest match / Class level",
            14 => "Recursive / Nearest match / Order level",
            15 => "Recursive / Nearest match / Phylum level",
            16 => "Recursive / Nearest match / Kingdom level",
            17 => "Recursive / Nearest match / Domain level",
            18 => "Recursive / Nearest match / Unranked",
            20 => "Specific epithet corrected / Exact DB / Single match",
            21 => "Specific epithet corrected / Exact DB / Multiple match",
            22 => "Specific epithet corrected / Recursive / Single match",
            23 => "Specific epithet corrected / Recursive / Multiple match",
            24 => "Specific epithet corrected / Recursive / Nearest match",
            25 => "Specific epithet corrected / Strain name involved",
            30 => "Latin inflection corrected / Exact DB / Single match",
            31 => "Latin inflection corrected / Exact DB / Nearest match",
            32 => "Generic epithet corrected / Exact DB / Single match",
            33 => "Generic epithet corrected / Exact DB / Multiple match",
            34 => "Generic epithet corrected / Recursive / Single match",
            35 => "Generic epithet corrected / Recursive / Multiple match",
            36 => "Generic epithet corrected / Recursive / Nearest match",
            40 => "Correction denied / Strain name involved / Nearest match",
            41 => {
                "Correction denied / Similarity-related abbreviation identified / Nearest match"
            }
            90 => "Rule-based screening / Non-organism",
            91 => "Rule-based screening / Unclassified-Uncultured-Unidentified",
            92 => "Rule-based screening / Environmental sample",
            93 => "Rule-based screening / Virus or phage - manual check required",
            94 => "Rule-based screening / Phytoplasma - manual check required",
            95 => "Rule-based screening / (endo)symbiont - manual check required",
            96 => "Rule-based screening / Unresolvable hybrid - manual check required",
            97 => "Rule-based screening / Multiple materia medica - manual check required",
            100 => "Unmapped / partial match (most likely genus level)",
            _ => "Unmapped",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a resolved row should be checked by a curator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualReview {
    No,
    Maybe,
    Yes,
}

impl ManualReview {
    #[must_use]
    pub fn for_status(status: StatusCode) -> Self {
        match status.0 {
            0 | 1 | 3 | 4 | 6 | 10 | 20 | 22 | 30 | 31 | 32 | 34 => Self::No,
            11..=17 | 24 | 36 => Self::Maybe,
            _ => Self::Yes,
        }
    }
}

impl std::fmt::Display for ManualReview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::No => write!(f, "NO"),
            Self::Maybe => write!(f, "MAYBE"),
            Self::Yes => write!(f, "YES"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_lineage_rank() {
        assert_eq!(StatusCode::from_lineage_rank(rank::SPECIES), StatusCode(10));
        assert_eq!(StatusCode::from_lineage_rank(rank::GENUS), StatusCode(11));
        assert_eq!(StatusCode::from_lineage_rank(rank::ROOT), StatusCode(17));
    }

    #[test]
    fn test_manual_review_tiers() {
        for code in [0, 1, 3, 4, 6, 10, 20, 22, 30, 31, 32, 34] {
            assert_eq!(ManualReview::for_status(StatusCode(code)), ManualReview::No);
        }
        for code in [11, 12, 13, 14, 15, 16, 17, 24, 36] {
            assert_eq!(
                ManualReview::for_status(StatusCode(code)),
                ManualReview::Maybe
            );
        }
        for code in [2, 5, 8, 21, 33, 40, 41, 90, 97, 100, 1000] {
            assert_eq!(ManualReview::for_status(StatusCode(code)), ManualReview::Yes);
        }
    }

    #[test]
    fn test_status_description() {
        assert_eq!(StatusCode::EXACT.description(), "Raw / Exact DB / Canonical match");
        assert_eq!(StatusCode::UNMAPPED.description(), "Unmapped");
        assert_eq!(StatusCode(18).description(), "Recursive / Nearest match / Unranked");
        assert_eq!(
            StatusCode(25).description(),
            "Specific epithet corrected / Strain name involved"
        );
        assert!(StatusCode::SCREEN_VIRUS.is_screened());
        assert!(!StatusCode::PARTIAL.is_screened());
    }
}
