//! Triage engine — owns the knowledge table and wires normalizer and
//! composer to one lemmatizer.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use vitalife_core::{Result, UserProfile, VitaLifeConfig};
use vitalife_lexicon::{create_lemmatizer, Lemmatizer};

use crate::compose::Composer;
use crate::knowledge::KnowledgeBase;
use crate::normalize::Normalizer;
use crate::rules::NORMALIZATION_RULES;
use crate::types::{Assessment, ResponseRecord, TriageTuning};

/// Engine summary for status endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineStatus {
    pub conditions: usize,
    pub condition_names: Vec<String>,
    pub normalization_rules: usize,
    pub lemmatizer: String,
    pub lemmatizer_available: bool,
}

pub struct TriageEngine {
    knowledge: Arc<KnowledgeBase>,
    lemmatizer: Arc<dyn Lemmatizer>,
    normalizer: Normalizer,
    composer: Composer,
}

impl TriageEngine {
    pub fn new(
        knowledge: KnowledgeBase,
        lemmatizer: Arc<dyn Lemmatizer>,
        tuning: TriageTuning,
    ) -> Self {
        let knowledge = Arc::new(knowledge);
        let normalizer = Normalizer::new(&knowledge, lemmatizer.clone());
        let composer = Composer::new(knowledge.clone(), lemmatizer.clone(), tuning);
        Self {
            knowledge,
            lemmatizer,
            normalizer,
            composer,
        }
    }

    /// Builtin table with default tuning.
    pub fn builtin(lemmatizer: Arc<dyn Lemmatizer>) -> Result<Self> {
        Ok(Self::new(
            KnowledgeBase::builtin()?,
            lemmatizer,
            TriageTuning::default(),
        ))
    }

    /// Load the knowledge table and lemmatizer named by `config`.
    pub fn from_config(config: &VitaLifeConfig) -> Result<Self> {
        let knowledge = match &config.knowledge_path {
            Some(path) => {
                let kb = KnowledgeBase::load(path)?;
                info!("Loaded {} conditions from {}", kb.len(), path.display());
                kb
            }
            None => KnowledgeBase::builtin()?,
        };

        let lemmatizer = create_lemmatizer(
            &config.lemmatizer,
            config.lexicon_retries,
            config.lexicon_retry_delay,
        );

        Ok(Self::new(knowledge, lemmatizer, TriageTuning::default()))
    }

    pub fn normalize(&self, raw_text: &str) -> String {
        self.normalizer.normalize(raw_text)
    }

    pub fn compose(&self, raw_text: &str, profile: Option<&UserProfile>) -> ResponseRecord {
        self.composer.compose(raw_text, profile)
    }

    /// Normalize (when `auto_fill` is set) and compose one message.
    pub fn assess(
        &self,
        raw_text: &str,
        profile: Option<&UserProfile>,
        auto_fill: bool,
    ) -> Assessment {
        let normalized_text = auto_fill.then(|| self.normalize(raw_text));
        Assessment {
            normalized_text,
            response: self.compose(raw_text, profile),
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            conditions: self.knowledge.len(),
            condition_names: self
                .knowledge
                .records()
                .iter()
                .map(|r| r.name.clone())
                .collect(),
            normalization_rules: NORMALIZATION_RULES.len(),
            lemmatizer: self.lemmatizer.name().to_string(),
            lemmatizer_available: self.lemmatizer.is_available(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalife_core::LemmatizerMode;

    #[test]
    fn test_assess_with_and_without_auto_fill() {
        let engine = TriageEngine::builtin(Arc::new(vitalife_lexicon::RuleLemmatizer::new())).unwrap();

        let assessment = engine.assess("my head really hurts", None, true);
        assert_eq!(assessment.normalized_text.as_deref(), Some("headache"));
        // The composer scores the raw text, which holds no symptom phrase
        assert!(assessment.response.matched_condition_id.is_none());
        assert_eq!(assessment.response.confidence_tier, crate::ConfidenceTier::Low);

        let assessment = engine.assess("my head really hurts", None, false);
        assert!(assessment.normalized_text.is_none());
    }

    #[test]
    fn test_from_config_with_custom_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knowledge.json");
        std::fs::write(
            &path,
            r#"[{"id":"rash","name":"Rash","symptomPhrases":["itchy skin","rash"],
                 "relatedPhrases":["hives"],"advice":"Keep the area cool and dry.",
                 "bodySystem":"systemic"}]"#,
        )
        .unwrap();

        let config = VitaLifeConfig {
            knowledge_path: Some(path),
            lemmatizer: LemmatizerMode::Disabled,
            ..VitaLifeConfig::default()
        };
        let engine = TriageEngine::from_config(&config).unwrap();
        let status = engine.status();
        assert_eq!(status.conditions, 1);
        assert_eq!(status.lemmatizer, "none");
        assert!(!status.lemmatizer_available);

        let response = engine.compose("an itchy skin patch", None);
        assert_eq!(response.matched_condition_id.as_deref(), Some("rash"));
    }

    #[test]
    fn test_status_defaults() {
        let engine = TriageEngine::from_config(&VitaLifeConfig::default()).unwrap();
        let status = engine.status();
        assert_eq!(status.conditions, 6);
        assert_eq!(status.normalization_rules, 6);
        assert_eq!(status.lemmatizer, "rules");
    }
}
