//! Lemmatizer trait and the no-op backend.
//!
//! The `Lemmatizer` trait abstracts over lemma lookup. Implementations:
//! - `RuleLemmatizer`: suffix rules plus an irregular-form table
//! - `LexiconLemmatizer`: `form<TAB>lemma` file, rules for unknown words
//! - `NoopLemmatizer`: reports unavailable so callers skip lemmatization

use strsim::normalized_damerau_levenshtein;

/// Per-lemma score below which a lemma counts as unmatched. One edit on a
/// five-letter word ("never" vs "fever") scores 0.8 and stays below it.
pub const MIN_LEMMA_SIMILARITY: f64 = 0.85;

/// Trait for lemmatizer backends.
pub trait Lemmatizer: Send + Sync {
    /// Lemma of a single lower-case token.
    fn lemma(&self, token: &str) -> String;

    /// Short backend name for status output.
    fn name(&self) -> &'static str;

    /// Check if the lemmatizer is available (resource loaded).
    fn is_available(&self) -> bool {
        true
    }

    /// Lower-case `text`, replace each token with its lemma, join with
    /// single spaces.
    fn lemmatize(&self, text: &str) -> String {
        tokenize(&text.to_lowercase())
            .map(|t| self.lemma(t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Similarity in [0, 1] between two texts.
    ///
    /// Every lemma of `b` is scored against the lemmas of `a` and against
    /// each adjacent pair of `a` lemmas glued together (so "head ache"
    /// meets "headache"). Best scores under `MIN_LEMMA_SIMILARITY` count
    /// as zero; the result is the mean.
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let a_lemmas: Vec<String> = self.lemmatize(a).split(' ').map(str::to_string).collect();
        let b_text = self.lemmatize(&b.replace('_', " "));
        let b_lemmas: Vec<&str> = b_text.split(' ').filter(|t| !t.is_empty()).collect();
        if b_lemmas.is_empty() || a_lemmas.iter().all(|t| t.is_empty()) {
            return 0.0;
        }

        let mut candidates = a_lemmas.clone();
        candidates.extend(a_lemmas.windows(2).map(|w| format!("{}{}", w[0], w[1])));

        let total: f64 = b_lemmas
            .iter()
            .map(|target| {
                let best = candidates
                    .iter()
                    .map(|c| normalized_damerau_levenshtein(c, target))
                    .fold(0.0, f64::max);
                if best >= MIN_LEMMA_SIMILARITY {
                    best
                } else {
                    0.0
                }
            })
            .sum();

        total / b_lemmas.len() as f64
    }
}

/// Split on whitespace and strip surrounding punctuation. Inner
/// apostrophes and hyphens survive ("can't", "light-headed").
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
}

/// Placeholder lemmatizer that reports itself unavailable.
pub struct NoopLemmatizer;

impl Lemmatizer for NoopLemmatizer {
    fn lemma(&self, token: &str) -> String {
        token.to_string()
    }

    fn name(&self) -> &'static str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn similarity(&self, _a: &str, _b: &str) -> f64 {
        0.0
    }
}
