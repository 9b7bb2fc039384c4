//! Whitespace repair around punctuation, applied to raw input before resolution.

/// Re-space punctuation so that abbreviations and citations become separate tokens.
///
/// - a space is inserted after `,` `.` `)` unless a space or `)` follows
/// - a space is inserted before `(` unless a space precedes it
/// - a trailing `,` is dropped
/// - a space directly after `-` is dropped
/// - a space directly before `.` `,` `-` is dropped
///
/// # Examples
///
/// ```
/// use taxon_solver::normalize::punctuation::split_punctuation;
///
/// assert_eq!(split_punctuation("E.coli"), "E. coli");
/// assert_eq!(split_punctuation("Mus musculus(Linnaeus)"), "Mus musculus (Linnaeus)");
/// ```
#[must_use]
pub fn split_punctuation(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i >= 1 {
            let prev = chars[i - 1];
            if matches!(prev, ',' | '.' | ')') && !matches!(c, ' ' | ')') {
                out.push(' ');
            } else if c == '(' && prev != ' ' {
                out.push(' ');
            }
        }

        if c == ',' && i == chars.len() - 1 {
            continue;
        }
        if c == ' ' && i >= 1 && chars[i - 1] == '-' {
            continue;
        }
        if c == ' ' && chars.get(i + 1).is_some_and(|next| matches!(next, '.' | ',' | '-')) {
            continue;
        }

        out.push(c);
    }

    out
}
