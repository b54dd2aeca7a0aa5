//! Response composer — emergency check, condition scoring, rendering.
//!
//! Everything here works on the caller's raw text, never on the
//! normalizer's output.

use std::sync::Arc;

use tracing::debug;
use vitalife_core::UserProfile;
use vitalife_lexicon::Lemmatizer;

use crate::emergency::{detect_emergency, EMERGENCY_MESSAGE};
use crate::knowledge::{ConditionRecord, KnowledgeBase};
use crate::personalize::personal_notes;
use crate::suggest::suggest;
use crate::types::*;

pub const DISCLAIMER: &str = "**Disclaimer:** This is general information only. Always consult a healthcare professional for proper diagnosis and treatment.";

pub const GENERIC_MESSAGE: &str = "I understand you have a health concern. Please describe your symptoms in more detail (for example \"I have a headache and feel dizzy\"). For proper evaluation and advice specific to your situation, consult a healthcare professional.";

/// Best condition found for an input.
struct ConditionMatch<'a> {
    record: &'a ConditionRecord,
    score: f64,
    source: MatchSource,
}

pub struct Composer {
    knowledge: Arc<KnowledgeBase>,
    lemmatizer: Arc<dyn Lemmatizer>,
    tuning: TriageTuning,
}

impl Composer {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        lemmatizer: Arc<dyn Lemmatizer>,
        tuning: TriageTuning,
    ) -> Self {
        Self {
            knowledge,
            lemmatizer,
            tuning,
        }
    }

    pub fn compose(&self, raw_text: &str, profile: Option<&UserProfile>) -> ResponseRecord {
        if let Some(trigger) = detect_emergency(raw_text) {
            debug!(trigger, "emergency keyword detected");
            return ResponseRecord {
                text: EMERGENCY_MESSAGE.to_string(),
                is_emergency: true,
                confidence_tier: ConfidenceTier::High,
                matched_condition_id: None,
                score: 0.0,
                match_source: None,
                emergency_trigger: Some(trigger.to_string()),
                suggestions: Vec::new(),
            };
        }

        let lower = raw_text.to_lowercase();
        match self.best_condition(&lower) {
            Some(found) => self.render_match(found, profile),
            None => self.render_no_match(raw_text),
        }
    }

    /// Highest direct score (phrase length × weight), first-seen on ties.
    /// Lemmatizer similarity is consulted only when no phrase matched.
    fn best_condition(&self, lower: &str) -> Option<ConditionMatch<'_>> {
        let mut best: Option<(&ConditionRecord, usize)> = None;
        for record in self.knowledge.records() {
            for phrase in &record.symptom_phrases {
                if lower.contains(phrase.as_str()) {
                    let score = phrase.len() * self.tuning.direct_match_weight;
                    if score > best.map_or(0, |(_, s)| s) {
                        best = Some((record, score));
                    }
                }
            }
        }

        match best {
            Some((record, score)) => Some(ConditionMatch {
                record,
                score: score as f64,
                source: MatchSource::Direct,
            }),
            None => self.similarity_match(lower),
        }
    }

    /// Condition id most similar to the input, if above the threshold.
    /// The score is rescaled into direct-score units.
    fn similarity_match(&self, lower: &str) -> Option<ConditionMatch<'_>> {
        if !self.lemmatizer.is_available() || lower.trim().is_empty() {
            return None;
        }

        let mut best: Option<(&ConditionRecord, f64)> = None;
        for record in self.knowledge.records() {
            let sim = self.lemmatizer.similarity(lower, &record.id);
            if sim > best.map_or(0.0, |(_, s)| s) {
                best = Some((record, sim));
            }
        }

        let (record, sim) = best?;
        if sim <= self.tuning.similarity_threshold {
            return None;
        }

        let max_score =
            (self.knowledge.longest_symptom_phrase() * self.tuning.direct_match_weight) as f64;
        debug!(condition = %record.id, similarity = sim, "similarity match");
        Some(ConditionMatch {
            record,
            score: sim * max_score,
            source: MatchSource::Similarity,
        })
    }

    fn render_match(&self, found: ConditionMatch<'_>, profile: Option<&UserProfile>) -> ResponseRecord {
        let record = found.record;
        let mut text = String::from("Based on your symptoms, here's some general information:\n\n");
        text.push_str(&format!("**Possible condition:** {}\n\n", record.name));
        text.push_str(&format!("**Advice:** {}\n\n", record.advice));

        let hints: Vec<&str> = record
            .related_phrases
            .iter()
            .take(self.tuning.max_related_hints)
            .map(String::as_str)
            .collect();
        if !hints.is_empty() {
            text.push_str(&format!(
                "**Related symptoms to watch for:** {}\n\n",
                hints.join(", ")
            ));
        }

        if let Some(profile) = profile {
            let notes = personal_notes(profile, record, self.tuning.cardiac_age_threshold);
            text.push_str(&format!("**Personalized Note:** {}\n\n", notes.join(" ")));
        }

        text.push_str(DISCLAIMER);

        // Similarity matches are approximate and never reach HIGH
        let confidence_tier = match found.source {
            MatchSource::Direct if found.score > self.tuning.high_confidence_score as f64 => {
                ConfidenceTier::High
            }
            _ => ConfidenceTier::Medium,
        };

        ResponseRecord {
            text,
            is_emergency: record.is_emergency,
            confidence_tier,
            matched_condition_id: Some(record.id.clone()),
            score: found.score,
            match_source: Some(found.source),
            emergency_trigger: None,
            suggestions: Vec::new(),
        }
    }

    fn render_no_match(&self, raw_text: &str) -> ResponseRecord {
        let vocabulary = self.knowledge.symptom_vocabulary();
        let suggestions = suggest(
            raw_text,
            &vocabulary,
            self.tuning.fuzzy_cutoff,
            self.tuning.max_suggestions,
        );

        let text = if suggestions.is_empty() {
            GENERIC_MESSAGE.to_string()
        } else {
            format!(
                "I couldn't match that to a known condition. Did you mean: {}? Try describing your symptoms using one of these terms.\n\n{}",
                suggestions.join(", "),
                DISCLAIMER
            )
        };

        ResponseRecord {
            text,
            is_emergency: false,
            confidence_tier: ConfidenceTier::Low,
            matched_condition_id: None,
            score: 0.0,
            match_source: None,
            emergency_trigger: None,
            suggestions,
        }
    }
}
