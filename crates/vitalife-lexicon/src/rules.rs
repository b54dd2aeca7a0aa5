//! Suffix-rule lemmatizer with an irregular-form table.
//!
//! Handles the inflections that show up in symptom descriptions without
//! external resources. Phrases and user text go through the same rules, so
//! consistency matters more than linguistic accuracy.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::lemmatizer::Lemmatizer;

/// Forms the suffix rules get wrong.
static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let pairs: &[(&str, &str)] = &[
        ("am", "be"),
        ("is", "be"),
        ("are", "be"),
        ("was", "be"),
        ("were", "be"),
        ("been", "be"),
        ("being", "be"),
        ("has", "have"),
        ("had", "have"),
        ("having", "have"),
        ("felt", "feel"),
        ("feeling", "feel"),
        ("feels", "feel"),
        ("aching", "ache"),
        ("aches", "ache"),
        ("ached", "ache"),
        ("hurting", "hurt"),
        ("hurts", "hurt"),
        ("threw", "throw"),
        ("thrown", "throw"),
        ("breathing", "breathe"),
        ("breathes", "breathe"),
        ("breathed", "breathe"),
        ("sneezing", "sneeze"),
        ("wheezing", "wheeze"),
        ("vomiting", "vomit"),
        ("vomited", "vomit"),
        ("fainted", "faint"),
        ("fainting", "faint"),
        ("swelling", "swell"),
        ("swollen", "swell"),
        ("lungs", "lung"),
        ("teeth", "tooth"),
        ("feet", "foot"),
        ("got", "get"),
        ("getting", "get"),
        ("began", "begin"),
        ("worse", "bad"),
        ("worst", "bad"),
    ];
    pairs.iter().copied().collect()
});

/// Endings that look inflected but are not.
const PROTECTED_ENDINGS: &[&str] = &["ss", "us", "is", "itis", "ous", "betes", "sles"];

/// Letters that are legitimately doubled at the end of a base form.
const KEEP_DOUBLE: &[char] = &['l', 's', 'z', 'f'];

/// Lemmatize a single lower-case word with suffix rules.
pub fn rule_lemma(word: &str) -> String {
    if let Some(lemma) = IRREGULAR.get(word) {
        return lemma.to_string();
    }
    if word.len() <= 3 || !word.is_ascii() {
        return word.to_string();
    }
    if PROTECTED_ENDINGS.iter().any(|e| word.ends_with(e)) {
        return word.to_string();
    }

    // Plural and third-person endings: (suffix, replacement).
    let plural: &[(&str, &str)] = &[
        ("ies", "y"),
        ("sses", "ss"),
        ("ches", "ch"),
        ("shes", "sh"),
        ("xes", "x"),
        ("s", ""),
    ];
    for &(suffix, replacement) in plural {
        if let Some(stem) = strip(word, suffix, 3) {
            return format!("{}{}", stem, replacement);
        }
    }

    if let Some(stem) = strip(word, "ied", 2) {
        return format!("{}y", stem);
    }

    for suffix in ["ing", "ed"] {
        if let Some(stem) = strip(word, suffix, 3) {
            return undouble(stem);
        }
    }

    word.to_string()
}

/// Remove `suffix` when at least `min_stem` bytes remain.
fn strip<'a>(word: &'a str, suffix: &str, min_stem: usize) -> Option<&'a str> {
    if word.len() >= suffix.len() + min_stem && word.ends_with(suffix) {
        Some(&word[..word.len() - suffix.len()])
    } else {
        None
    }
}

/// "spinn" -> "spin", "throbb" -> "throb", but "swell" stays.
fn undouble(stem: &str) -> String {
    let mut chars = stem.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a == b && !"aeiou".contains(a) && !KEEP_DOUBLE.contains(&a) => {
            stem[..stem.len() - 1].to_string()
        }
        _ => stem.to_string(),
    }
}

/// Lemmatizer backed by the suffix rules alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleLemmatizer;

impl RuleLemmatizer {
    pub fn new() -> Self {
        Self
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemma(&self, token: &str) -> String {
        rule_lemma(token)
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lemmas() {
        assert_eq!(rule_lemma("allergies"), "allergy");
        assert_eq!(rule_lemma("chills"), "chill");
        assert_eq!(rule_lemma("spinning"), "spin");
        assert_eq!(rule_lemma("throbbing"), "throb");
        assert_eq!(rule_lemma("pounding"), "pound");
        assert_eq!(rule_lemma("hurts"), "hurt");
        assert_eq!(rule_lemma("felt"), "feel");
        assert_eq!(rule_lemma("studied"), "study");
        assert_eq!(rule_lemma("coughed"), "cough");
    }

    #[test]
    fn test_words_left_alone() {
        for word in [
            "headache", "nausea", "dizziness", "sinusitis", "nauseous", "diabetes", "chest",
            "pain", "head", "virus", "fever", "migraine", "swell",
        ] {
            assert_eq!(rule_lemma(word), word, "{} should be unchanged", word);
        }
    }

    #[test]
    fn test_lemmatize_sentence() {
        let lemmatizer = RuleLemmatizer::new();
        assert_eq!(
            lemmatizer.lemmatize("My head is  Pounding, and the room keeps spinning!"),
            "my head be pound and the room keep spin"
        );
    }

    #[test]
    fn test_lemmatize_is_consistent() {
        let lemmatizer = RuleLemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("chills"), lemmatizer.lemmatize("Chills"));
    }
}
