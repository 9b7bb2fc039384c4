//! Rule-based screening of names that should not be resolved at all.
//!
//! Tokens are compared case-insensitively. Categories are scanned in the
//! order below and the first one with a matching token wins:
//!
//! | Code | Category | Keywords |
//! |------|----------|----------|
//! | 90 | non-organism | collection, construct, library, plasmid, sequence, transposon, vector, `<<` |
//! | 91 | unclassified | unclassified, uncultured, unidentified |
//! | 92 | environmental sample | environmental, sample, enrichment, culture |
//! | 93 | virus | virus, phage |
//! | 94 | phytoplasma | phytoplasma |
//! | 95 | symbiont | symbiont, endosymbiont, symbiotic |
//! | 96 | hybrid | x, × |
//! | 97 | materia medica mixture | lac, massa fermentata, sal, seu |

use crate::core::types::StatusCode;

/// Screening categories in scan order; multi-word keywords match consecutive tokens
pub static SCREENING_RULES: &[(StatusCode, &[&str])] = &[
    (
        StatusCode::SCREEN_NON_ORGANISM,
        &[
            "collection",
            "construct",
            "library",
            "plasmid",
            "sequence",
            "transposon",
            "vector",
            "<<",
        ],
    ),
    (
        StatusCode::SCREEN_UNCLASSIFIED,
        &["unclassified", "uncultured", "unidentified"],
    ),
    (
        StatusCode::SCREEN_ENVIRONMENTAL,
        &["environmental", "sample", "enrichment", "culture"],
    ),
    (StatusCode::SCREEN_VIRUS, &["virus", "phage"]),
    (StatusCode::SCREEN_PHYTOPLASMA, &["phytoplasma"]),
    (
        StatusCode::SCREEN_SYMBIONT,
        &["symbiont", "endosymbiont", "symbiotic"],
    ),
    (StatusCode::SCREEN_HYBRID, &["x", "×"]),
    (
        StatusCode::SCREEN_MULTIPLE,
        &["lac", "massa fermentata", "sal", "seu"],
    ),
];

/// Screening code for `input`, or `None` when no rule applies
#[must_use]
pub fn screen(input: &str) -> Option<StatusCode> {
    let lower = input.to_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();

    SCREENING_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| contains_phrase(&tokens, keyword)))
        .map(|&(status, _)| status)
}

fn contains_phrase(tokens: &[&str], phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split(' ').collect();
    tokens.windows(words.len()).any(|window| window == words.as_slice())
}
