use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use crate::parsing::{read_text, ParseError};

/// Read a list of free-text names, one per line
///
/// Blank lines are kept (with a warning) so that row numbers match the input file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read.
pub fn read_name_list(path: &Path) -> Result<Vec<String>, ParseError> {
    Ok(parse_name_list(&read_text(path)?))
}

#[must_use]
pub fn parse_name_list(text: &str) -> Vec<String> {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            let name = line.trim_end_matches('\r');
            if name.trim().is_empty() {
                warn!("Blank name on input line {}, reported as unmapped", i + 1);
            }
            name.to_string()
        })
        .collect()
}

/// Manually curated replacements for names the pipeline cannot handle
#[derive(Debug, Clone, Default)]
pub struct CurationTable {
    replacements: HashMap<String, String>,
}

impl CurationTable {
    /// Load a curation table from a two-column TSV file with a header row
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, ParseError> {
        Ok(Self::from_text(&read_text(path)?))
    }

    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut replacements = HashMap::new();

        for (i, line) in text.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            match (fields.next(), fields.next()) {
                (Some(raw), Some(replacement)) if !replacement.trim().is_empty() => {
                    replacements.insert(raw.trim().to_lowercase(), replacement.trim().to_string());
                }
                _ => warn!("Curation table line {} has no replacement, skipped", i + 1),
            }
        }

        Self { replacements }
    }

    /// Replacement for `raw`, matched case-insensitively
    #[must_use]
    pub fn lookup(&self, raw: &str) -> Option<&str> {
        self.replacements
            .get(&raw.trim().to_lowercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_list_keeps_blank_rows() {
        let names = parse_name_list("Homo sapiens\r\n\nPanax ginseng\n");
        assert_eq!(names, vec!["Homo sapiens", "", "Panax ginseng"]);
    }

    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_blank_rows_logged() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let names = tracing::subscriber::with_default(subscriber, || {
            parse_name_list("Homo sapiens\n   \nPanax ginseng\n")
        });
        assert_eq!(names.len(), 3);

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Blank name on input line 2"), "{output}");
        assert!(!output.contains("line 1"));
        assert!(!output.contains("line 3"));
    }

    #[test]
    fn test_curation_table() {
        let table = CurationTable::from_text(
            "raw_name\tcurated_name\nGinseng Radix\tPanax ginseng\nbroken line\n",
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("ginseng radix"), Some("Panax ginseng"));
        assert_eq!(table.lookup("GINSENG RADIX "), Some("Panax ginseng"));
        assert_eq!(table.lookup("raw_name"), None);
        assert!(table.lookup("Homo sapiens").is_none());
    }
}
