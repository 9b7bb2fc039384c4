//! String normalization for free-text organism names.
//!
//! All functions here are pure: they never consult the reference index.
//!
//! - [`punctuation`]: whitespace repair applied to raw input
//! - [`qualifier`]: strips `sp.`, `cf.`, hybrid signs and abbreviations, reporting what was seen
//! - [`latin`]: expands genitive crude-drug names into nominative respellings

pub mod latin;
pub mod punctuation;
pub mod qualifier;

pub use qualifier::{strip_qualifiers, QualifierFlags, StrippedName};
