//! Ordered normalization rules: pattern → canonical symptom phrase.
//!
//! Patterns are written to match both raw lower-cased text and lemmatized
//! text ("head hurts" and "head hurt"). The first matching rule wins.

use once_cell::sync::Lazy;
use regex::Regex;

/// A compiled rule.
pub struct NormalizationRule {
    pub pattern: Regex,
    pub canonical: &'static str,
}

fn rule(pattern: &str, canonical: &'static str) -> NormalizationRule {
    NormalizationRule {
        pattern: Regex::new(pattern).unwrap(),
        canonical,
    }
}

/// Rules in evaluation order.
pub static NORMALIZATION_RULES: Lazy<Vec<NormalizationRule>> = Lazy::new(|| {
    vec![
        rule(
            r"(?i)\bhead\s*(?:\w+\s+)?(?:hurt|pain|ache|pound|throb)|\b(?:pain|ache)\s+in\s+(?:my|the)\s+head\b",
            "headache",
        ),
        rule(
            r"(?i)\bchest\s*(?:\w+\s+)?(?:hurt|pain|tight|pressure|ache)|\bheart\s*(?:\w+\s+)?(?:hurt|pain|ache)",
            "chest pain",
        ),
        rule(
            r"(?i)\bfeel\w*\s+(?:very\s+|really\s+|so\s+)?(?:hot|feverish)\b|\bhigh\s+temp|\bburn\w*\s+up\b|\brun\w*\s+a\s+temp",
            "fever",
        ),
        rule(
            r"(?i)\bfeel\w*\s+(?:very\s+|really\s+|so\s+)?(?:sick|queasy)\b|\bwant\w*\s+to\s+(?:vomit|puke|throw\s+up)|\b(?:throw|threw)\w*\s+up\b|\bsick\s+to\s+my\s+stomach",
            "nausea",
        ),
        rule(
            r"(?i)\broom\s+(?:\w+\s+)?spin|\blight[\s-]?head|\bfeel\w*\s+(?:very\s+|really\s+|so\s+)?(?:faint|woozy|dizzy)\b",
            "dizziness",
        ),
        rule(
            r"(?i)(?:can'?t|cannot|couldn'?t|could\s+not)\s+catch\s+(?:my\s+)?breath|\b(?:out|short)\s+of\s+breath|\bhard\s+to\s+breathe|\btrouble\s+breath|\bbreathless",
            "shortness of breath",
        ),
    ]
});

/// Canonical phrase of the first rule matching `text`.
pub fn first_match(text: &str) -> Option<&'static str> {
    NORMALIZATION_RULES
        .iter()
        .find(|r| r.pattern.is_match(text))
        .map(|r| r.canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_compile() {
        assert_eq!(NORMALIZATION_RULES.len(), 6);
    }

    #[test]
    fn test_each_rule() {
        let cases = [
            ("i have head pain", "headache"),
            ("my head really hurts", "headache"),
            ("a dull ache in my head", "headache"),
            ("my chest feels tight", "chest pain"),
            ("heart pain since lunch", "chest pain"),
            ("i feel really hot", "fever"),
            ("i'm burning up", "fever"),
            ("i want to throw up", "nausea"),
            ("threw up twice", "nausea"),
            ("the room keeps spinning", "dizziness"),
            ("feeling light-headed", "dizziness"),
            ("i can't catch my breath", "shortness of breath"),
            ("out of breath on the stairs", "shortness of breath"),
        ];
        for (text, expected) in cases {
            assert_eq!(first_match(text), Some(expected), "input: {}", text);
        }
    }

    #[test]
    fn test_first_rule_wins() {
        // Both the headache and nausea rules match; headache is listed first
        assert_eq!(first_match("head hurts and i feel sick"), Some("headache"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(first_match("what is normal blood pressure"), None);
        assert_eq!(first_match("overhead lights"), None);
    }
}
