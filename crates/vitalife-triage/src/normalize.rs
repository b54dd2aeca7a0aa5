//! Input normalizer — rewrites free text into a canonical symptom phrase.
//!
//! Steps: lower-case, lemmatize (when a lemmatizer is available), first
//! matching rule, then phrase-count scoring over the knowledge table. If
//! nothing applies the raw input comes back untouched.

use std::sync::Arc;

use tracing::debug;
use vitalife_lexicon::Lemmatizer;

use crate::knowledge::KnowledgeBase;
use crate::rules;

/// Condition id with its phrases in lemmatized form.
struct LemmatizedRecord {
    id: String,
    phrases: Vec<String>,
}

pub struct Normalizer {
    lemmatizer: Arc<dyn Lemmatizer>,
    records: Vec<LemmatizedRecord>,
}

impl Normalizer {
    pub fn new(knowledge: &KnowledgeBase, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        let records = knowledge
            .records()
            .iter()
            .map(|r| LemmatizedRecord {
                id: r.id.clone(),
                phrases: r
                    .all_phrases()
                    .map(|p| prepare(lemmatizer.as_ref(), p))
                    .collect(),
            })
            .collect();

        Self {
            lemmatizer,
            records,
        }
    }

    /// Canonical phrase for `raw_text`, or `raw_text` itself.
    pub fn normalize(&self, raw_text: &str) -> String {
        let prepared = prepare(self.lemmatizer.as_ref(), raw_text);

        if let Some(canonical) = rules::first_match(&prepared) {
            debug!(canonical, "normalization rule matched");
            return canonical.to_string();
        }

        match self.best_record(&prepared) {
            Some(id) => {
                debug!(id, "normalized by phrase count");
                id.to_string()
            }
            None => raw_text.to_string(),
        }
    }

    /// Highest phrase count, earliest record on ties, `None` if all zero.
    fn best_record(&self, text: &str) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for record in &self.records {
            let count = record
                .phrases
                .iter()
                .filter(|p| !p.is_empty() && text.contains(p.as_str()))
                .count();
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((&record.id, count));
            }
        }
        best.map(|(id, _)| id)
    }
}

/// Lower-case and, when available, lemmatize.
fn prepare(lemmatizer: &dyn Lemmatizer, text: &str) -> String {
    let lower = text.to_lowercase();
    if lemmatizer.is_available() {
        lemmatizer.lemmatize(&lower)
    } else {
        lower
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalife_lexicon::{NoopLemmatizer, RuleLemmatizer};

    fn normalizer(lemmatizer: Arc<dyn Lemmatizer>) -> Normalizer {
        Normalizer::new(&KnowledgeBase::builtin().unwrap(), lemmatizer)
    }

    #[test]
    fn test_head_pain_is_headache() {
        for lemmatizer in [
            Arc::new(RuleLemmatizer::new()) as Arc<dyn Lemmatizer>,
            Arc::new(NoopLemmatizer),
        ] {
            assert_eq!(normalizer(lemmatizer).normalize("I have head pain"), "headache");
        }
    }

    #[test]
    fn test_lemmatization_feeds_rules() {
        let n = normalizer(Arc::new(RuleLemmatizer::new()));
        // "feeling" -> "feel", "throwing" -> "throw"
        assert_eq!(n.normalize("Feeling queasy and throwing up"), "nausea");
        assert_eq!(n.normalize("Running a temperature since Monday"), "fever");
    }

    #[test]
    fn test_phrase_count_fallback() {
        let n = normalizer(Arc::new(RuleLemmatizer::new()));
        // No rule matches; "chills" lemmatizes to "chill" on both sides
        assert_eq!(n.normalize("I've had the chills all night"), "fever");
        // Two headache phrases beat one nausea phrase
        assert_eq!(n.normalize("migraine with blurred vision"), "headache");
    }

    #[test]
    fn test_fallback_tie_prefers_earlier_record() {
        let n = normalizer(Arc::new(NoopLemmatizer));
        // One headache phrase ("migraine"), one nausea phrase ("queasy")
        assert_eq!(n.normalize("migraine, slightly queasy"), "headache");
    }

    #[test]
    fn test_unmatched_returns_raw_text() {
        let n = normalizer(Arc::new(RuleLemmatizer::new()));
        assert_eq!(
            n.normalize("What is Normal Blood Pressure?"),
            "What is Normal Blood Pressure?"
        );
        assert_eq!(n.normalize(""), "");
    }
}
