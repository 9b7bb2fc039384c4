//! Bounded Damerau-Levenshtein distance and letter-frequency pre-filtering.

use crate::core::taxon::{LetterSignature, SIGNATURE_BINS};

/// Optimal-string-alignment distance between `a` and `b`, abandoned early.
///
/// Substitution, insertion, deletion and adjacent transposition all cost 1.
/// Row minima never decrease, so once a whole row exceeds `cutoff` the
/// computation stops and `max(len(a), len(b))` is returned instead of the
/// true distance. Any value above `cutoff` therefore means "rejected", never
/// an exact distance; values at or below `cutoff` are exact.
///
/// # Examples
///
/// ```
/// use taxon_solver::matching::distance::bounded_edit_distance;
///
/// assert_eq!(bounded_edit_distance("homo sapien", "homo sapiens", 3), 1);
/// assert!(bounded_edit_distance("homo", "escherichia", 2) > 2);
/// ```
#[must_use]
pub fn bounded_edit_distance(a: &str, b: &str, cutoff: usize) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (n, m) = (a.len(), b.len());
    let rejected = n.max(m);

    if n == 0 || m == 0 {
        return rejected;
    }

    // Three rolling rows: i-2, i-1, i
    let mut before: Vec<usize> = vec![0; m + 1];
    let mut previous: Vec<usize> = (0..=m).collect();
    let mut current: Vec<usize> = vec![0; m + 1];

    for i in 1..=n {
        current[0] = i;
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut value = (previous[j - 1] + cost)
                .min(previous[j] + 1)
                .min(current[j - 1] + 1);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                value = value.min(before[j - 2] + 1);
            }
            current[j] = value;
        }

        if current.iter().min().is_some_and(|&min| min > cutoff) {
            return rejected;
        }

        std::mem::swap(&mut before, &mut previous);
        std::mem::swap(&mut previous, &mut current);
    }

    previous[m]
}

/// Letter-frequency signature: counts of a-z (case-insensitive) plus one "other" bin
#[must_use]
pub fn letter_frequency(s: &str) -> LetterSignature {
    let mut signature = [0u32; SIGNATURE_BINS];
    for c in s.chars().flat_map(char::to_lowercase) {
        let bin = if c.is_ascii_lowercase() {
            (c as usize) - ('a' as usize)
        } else {
            SIGNATURE_BINS - 1
        };
        signature[bin] += 1;
    }
    signature
}

/// Number of signature bins that differ; an O(alphabet) lower-effort stand-in
/// for the full distance when pruning candidate pools
#[must_use]
pub fn frequency_distance(a: &LetterSignature, b: &LetterSignature) -> usize {
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unbounded reference implementation used to check the bounded one
    fn osa_distance(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let mut d = vec![vec![0usize; b.len() + 1]; a.len() + 1];
        for (i, row) in d.iter_mut().enumerate() {
            row[0] = i;
        }
        for j in 0..=b.len() {
            d[0][j] = j;
        }
        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let cost = usize::from(a[i - 1] != b[j - 1]);
                d[i][j] = (d[i - 1][j] + 1)
                    .min(d[i][j - 1] + 1)
                    .min(d[i - 1][j - 1] + cost);
                if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                    d[i][j] = d[i][j].min(d[i - 2][j - 2] + 1);
                }
            }
        }
        d[a.len()][b.len()]
    }

    #[test]
    fn test_basic_edits() {
        assert_eq!(bounded_edit_distance("kitten", "kitten", 3), 0);
        assert_eq!(bounded_edit_distance("kitten", "sitten", 3), 1);
        assert_eq!(bounded_edit_distance("kitten", "kittn", 3), 1);
        assert_eq!(bounded_edit_distance("kitten", "kitteen", 3), 1);
        assert_eq!(bounded_edit_distance("kitten", "iktten", 3), 1);
        assert_eq!(bounded_edit_distance("kitten", "sitting", 3), 3);
    }

    #[test]
    fn test_rejection_sentinel() {
        // Over the cutoff without abandoning: the true distance comes back
        assert_eq!(bounded_edit_distance("kitten", "sitting", 2), 3);

        // Every row of the third prefix is already past the cutoff
        assert_eq!(bounded_edit_distance("abcdef", "uvwxyz", 2), 6);
    }

    #[test]
    fn test_empty_strings() {
        assert_eq!(bounded_edit_distance("", "", 0), 0);
        assert_eq!(bounded_edit_distance("", "abc", 3), 3);
        assert!(bounded_edit_distance("abc", "", 1) > 1);
    }

    #[test]
    fn test_bound_matches_reference_distance() {
        let words = [
            "homo sapiens",
            "homo sapien",
            "homo sapeins",
            "hommo sapiens",
            "panax ginseng",
            "panax ginsen",
            "escherichia coli",
            "eschrichia coli",
            "quercus robur",
            "",
            "a",
            "ab",
            "ba",
        ];
        for a in words {
            for b in words {
                let truth = osa_distance(a, b);
                for cutoff in 0..5 {
                    let bounded = bounded_edit_distance(a, b, cutoff);
                    if truth <= cutoff {
                        assert_eq!(bounded, truth, "{a:?} vs {b:?} at cutoff {cutoff}");
                    } else {
                        assert!(bounded > cutoff, "{a:?} vs {b:?} at cutoff {cutoff}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_letter_frequency() {
        let signature = letter_frequency("Homo-1");
        assert_eq!(signature[(b'h' - b'a') as usize], 1);
        assert_eq!(signature[(b'o' - b'a') as usize], 2);
        assert_eq!(signature[(b'm' - b'a') as usize], 1);
        assert_eq!(signature[26], 2);
        assert_eq!(signature.iter().sum::<u32>(), 6);
    }

    #[test]
    fn test_frequency_distance() {
        let homo = letter_frequency("homo");
        let hommo = letter_frequency("hommo");
        let bos = letter_frequency("bos");
        assert_eq!(frequency_distance(&homo, &homo), 0);
        assert_eq!(frequency_distance(&homo, &hommo), 1);
        assert_eq!(frequency_distance(&homo, &bos), 5);
    }
}
