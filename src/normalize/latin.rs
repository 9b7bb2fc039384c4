//! Latin inflection expansion.
//!
//! Crude-drug and specimen names often put the organism in the genitive
//! ("Radix Ginseng", "Folium Mori albae"). When such a name is detected, each
//! remaining token is expanded into its plausible nominative spellings and the
//! respellings are produced as the Cartesian product, capped at
//! [`MAX_LATIN_VARIANTS`].

use itertools::Itertools;

/// Anatomical, material and filler words that are never part of a taxon name
pub static NON_TAXON_WORDS: &[&str] = &[
    "bulbus", "carapax", "caulis", "concha", "cortex", "embryo", "exocarpium", "flos", "folium",
    "fructus", "herba", "lignum", "ligum", "oleum", "ootheca", "pedicellus", "pericarpium",
    "pollen", "radix", "rhizoma", "sanguis", "semen", "strobilus", "cum", "et", "radicis",
    "cornu", "praeparata", "preparata", "succus", "squama", "stigma", "oviductus", "acidum",
    "fel", "stamen", "pulveratum", "resina", "excrementum", "periostracum", "plumula", "corium",
    "dens", "extractum", "liquidum", "fossilia", "gummi", "massa", "fermentata", "medulla",
    "nidus", "penis", "corticis", "folii", "nodus", "rhizomatis", "plastrum", "ramulus", "testa",
    "testis", "exodermis", "germinatus", "arillus", "alburnum", "cacumen", "os", "petiolus",
    "pix", "pulvis", "spina", "receptaculum", "leaf", "of", "root", "twig", "the", "family",
    "from",
];

/// Trailing qualifiers and author abbreviations
pub static TRAILING_ABBREVIATIONS: &[&str] = &[
    "spp.", "sp.", "ssp", "spp", "sp", "var.", "f.", "l", "l.", "(l.)", "roxb", "roxb.", "fr.",
    "fr", "dc", "dc.",
];

/// Upper bound on the respellings generated for one name; every token ending
/// in `-i` multiplies the product by five
pub const MAX_LATIN_VARIANTS: usize = 1024;

/// Alternative spellings for each surviving token.
///
/// Returns one inner vector per kept token. Without any non-taxon word the
/// alternatives are just the tokens themselves.
#[must_use]
pub fn token_alternatives(tokens: &[&str]) -> Vec<Vec<String>> {
    let mut stripped_word = false;
    let mut kept: Vec<String> = Vec::with_capacity(tokens.len());
    let last = tokens.len().saturating_sub(1);

    for (i, &raw) in tokens.iter().enumerate() {
        let token = raw.to_lowercase();
        if NON_TAXON_WORDS.contains(&token.as_str()) {
            stripped_word = true;
        } else if i == last && TRAILING_ABBREVIATIONS.contains(&token.as_str()) {
            continue;
        } else if token.contains('(') || token.contains(')') {
            // "(L.)" style citations stay whole; "name(author)" keeps its pieces
            if token.starts_with('(') {
                kept.push(token);
                continue;
            }
            kept.extend(
                token
                    .split(['(', ')'])
                    .filter(|fragment| !fragment.is_empty())
                    .map(str::to_string),
            );
        } else if token.contains('.') && i < 2 && token.chars().count() <= 2 {
            continue;
        } else if !token.is_empty() {
            kept.push(token);
        }
    }

    if stripped_word {
        kept.iter().map(|token| declensions(token)).collect()
    } else {
        kept.into_iter().map(|token| vec![token]).collect()
    }
}

/// Regular-Latin respellings of `tokens`, first alternative first.
///
/// The product is generated lazily and stops after [`MAX_LATIN_VARIANTS`]
/// names; later tokens vary fastest. Returns an empty list (not a single
/// empty name) when every token was dropped.
#[must_use]
pub fn latin_variants(tokens: &[&str]) -> Vec<String> {
    let alternatives = token_alternatives(tokens);
    if alternatives.is_empty() {
        return Vec::new();
    }
    alternatives
        .into_iter()
        .multi_cartesian_product()
        .take(MAX_LATIN_VARIANTS)
        .map(|combination| combination.join(" "))
        .collect()
}

/// Candidate nominative forms of one genitive-looking token.
///
/// Suffix classes overlap; they are tried in a fixed order and the first
/// match wins.
fn declensions(token: &str) -> Vec<String> {
    if let Some(stem) = token.strip_suffix('e').filter(|_| token.ends_with("ae")) {
        return vec![stem.to_string(), token.to_string()];
    }

    if let Some(stem) = token.strip_suffix("is") {
        let mut forms = vec![token.to_string()];
        if let Some(base) = token.strip_suffix("cis") {
            if let Some(base4) = token.strip_suffix("icis") {
                forms.push(format!("{base4}ex"));
            }
            forms.push(format!("{base}x"));
        } else if let Some(base) = token.strip_suffix("dis") {
            forms.push(format!("{base}s"));
            forms.push(format!("{base}des"));
        } else if let Some(base) = token
            .strip_suffix("inis")
            .or_else(|| token.strip_suffix("onis"))
        {
            forms.push(format!("{base}o"));
        } else if let Some(base) = token.strip_suffix("ntis") {
            forms.push(format!("{base}s"));
        } else if token.ends_with("itis") {
            forms.push(format!("{}s", &token[..token.len() - 3]));
        } else if let Some(base) = token.strip_suffix("this") {
            forms.push(format!("{base}thes"));
        } else {
            forms.push(stem.to_string());
        }
        return forms;
    }

    if let Some(stem) = token.strip_suffix('i') {
        return vec![
            token.to_string(),
            format!("{stem}os"),
            format!("{stem}on"),
            format!("{stem}um"),
            format!("{stem}us"),
        ];
    }

    vec![token.to_string()]
}
