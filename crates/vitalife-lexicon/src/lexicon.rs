//! Lexicon-file lemmatizer.
//!
//! File format: one `form<TAB>lemma` pair per line, UTF-8. Blank lines and
//! lines starting with `#` are ignored. Forms missing from the file fall
//! back to the suffix rules.

use std::collections::HashMap;
use std::path::Path;

use vitalife_core::{Error, Result};

use crate::lemmatizer::Lemmatizer;
use crate::rules::rule_lemma;

pub struct LexiconLemmatizer {
    entries: HashMap<String, String>,
}

impl LexiconLemmatizer {
    /// Load a lexicon from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
            .map_err(|e| Error::Lexicon(format!("{}: {}", path.display(), e)))
    }

    /// Parse lexicon text. Rejects malformed lines and empty lexicons.
    pub fn parse(data: &str) -> std::result::Result<Self, String> {
        let mut entries = HashMap::new();

        for (idx, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            match (fields.next(), fields.next(), fields.next()) {
                (Some(form), Some(lemma), None)
                    if !form.trim().is_empty() && !lemma.trim().is_empty() =>
                {
                    entries.insert(form.trim().to_lowercase(), lemma.trim().to_lowercase());
                }
                _ => return Err(format!("line {}: expected 'form<TAB>lemma'", idx + 1)),
            }
        }

        if entries.is_empty() {
            return Err("lexicon has no entries".into());
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lemmatizer for LexiconLemmatizer {
    fn lemma(&self, token: &str) -> String {
        match self.entries.get(token) {
            Some(lemma) => lemma.clone(),
            None => rule_lemma(token),
        }
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
