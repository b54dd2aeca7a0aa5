//! "Did you mean" suggestions for unmatched input.
//!
//! Each known symptom phrase is compared with every window of the input
//! holding the same number of words (Sørensen–Dice over character
//! bigrams). Phrases clearing the cutoff are returned best first.

use strsim::sorensen_dice;
use vitalife_lexicon::tokenize;

pub fn suggest(raw_text: &str, vocabulary: &[&str], cutoff: f64, limit: usize) -> Vec<String> {
    let lower = raw_text.to_lowercase();
    let words: Vec<&str> = tokenize(&lower).collect();
    if words.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, f64)> = vocabulary
        .iter()
        .enumerate()
        .filter_map(|(idx, phrase)| {
            let score = best_window_score(&words, phrase);
            (score >= cutoff).then_some((idx, score))
        })
        .collect();

    // Stable sort keeps table order among equal scores
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .take(limit)
        .map(|(idx, _)| vocabulary[idx].to_string())
        .collect()
}

fn best_window_score(words: &[&str], phrase: &str) -> f64 {
    let width = phrase.split_whitespace().count().clamp(1, words.len());
    words
        .windows(width)
        .map(|w| sorensen_dice(&w.join(" "), phrase))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOCAB: &[&str] = &["headache", "migraine", "fever", "dizziness", "chest pressure"];

    #[test]
    fn test_typo_suggestions() {
        let suggestions = suggest("bad hedache today", VOCAB, 0.4, 3);
        assert_eq!(suggestions.first().map(String::as_str), Some("headache"));
    }

    #[test]
    fn test_multiword_window() {
        let suggestions = suggest("some chest presure", VOCAB, 0.4, 3);
        assert_eq!(suggestions.first().map(String::as_str), Some("chest pressure"));
    }

    #[test]
    fn test_nothing_close() {
        assert!(suggest("xyzzy qwerty", VOCAB, 0.4, 3).is_empty());
        assert!(suggest("", VOCAB, 0.4, 3).is_empty());
    }

    #[test]
    fn test_limit() {
        let suggestions = suggest("dizzines fevers hedache migrane", VOCAB, 0.4, 2);
        assert_eq!(suggestions.len(), 2);
    }
}
