//! Qualifier stripping: removes rank qualifiers, uncertain-identification
//! markers and hybrid signs from a name.

/// Rank and infra-specific qualifiers
pub static IGNORABLE_QUALIFIERS: &[&str] = &[
    "sp.", "ssp.", "genomosp.", "genosp.", "subsp.", "var.", "str.", "f.", "pv.", "bv.", "s.",
    "s.l.", "al.", "sect.", "subgen.", "nom.", "no.", "species",
];

/// Markers of an unreliable identification
pub static DROPOUT_QUALIFIERS: &[&str] = &["cf.", "aff.", "nr.", "n.", "s.n.", "nov.", "gen.", "inval."];

/// Hybrid signs
pub static HYBRID_MARKERS: &[&str] = &["×", "x"];

const SYNONYM_FRAGMENT: &str = "[syn.";

/// Which qualifier categories were seen while stripping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualifierFlags {
    pub ignorable: bool,
    pub dropout: bool,
    pub hybrid: bool,
}

impl QualifierFlags {
    /// Number of categories seen
    #[must_use]
    pub fn count(&self) -> usize {
        usize::from(self.ignorable) + usize::from(self.dropout) + usize::from(self.hybrid)
    }
}

/// Result of [`strip_qualifiers`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedName {
    /// Lower-cased ordinary tokens joined by single spaces
    pub text: String,
    pub flags: QualifierFlags,
}

/// Strip qualifier tokens from `input`.
///
/// The input is lower-cased and truncated at a `[syn.` fragment, then each
/// whitespace token is classified. Tokens containing `.` or `,` are treated as
/// abbreviations and dropped when the name has two or more tokens.
///
/// # Examples
///
/// ```
/// use taxon_solver::normalize::qualifier::strip_qualifiers;
///
/// let stripped = strip_qualifiers("Homo sapiens sp.");
/// assert_eq!(stripped.text, "homo sapiens");
/// assert!(stripped.flags.ignorable);
/// ```
#[must_use]
pub fn strip_qualifiers(input: &str) -> StrippedName {
    let lower = input.to_lowercase();
    let lower = match lower.find(SYNONYM_FRAGMENT) {
        Some(pos) => &lower[..pos],
        None => lower.as_str(),
    };

    let tokens: Vec<&str> = lower.split_whitespace().collect();
    let mut flags = QualifierFlags::default();
    let mut kept: Vec<String> = Vec::with_capacity(tokens.len());

    for &token in &tokens {
        if IGNORABLE_QUALIFIERS.contains(&token) {
            flags.ignorable = true;
        } else if DROPOUT_QUALIFIERS.contains(&token) {
            flags.dropout = true;
        } else if HYBRID_MARKERS.contains(&token) {
            flags.hybrid = true;
        } else if token.contains('.') || token.contains(',') {
            if tokens.len() < 2 {
                kept.push(token.to_string());
            }
        } else if token.contains('<') || token.contains('>') {
            let unbracketed: String = token.chars().filter(|c| !matches!(c, '<' | '>')).collect();
            if !unbracketed.is_empty() {
                kept.push(unbracketed);
            }
        } else {
            kept.push(token.to_string());
        }
    }

    StrippedName {
        text: kept.join(" "),
        flags,
    }
}
