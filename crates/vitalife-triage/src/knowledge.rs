//! Condition knowledge table.
//!
//! The table is loaded once (builtin or from a JSON file), validated, and
//! never mutated afterwards. Record order matters: every scoring pass
//! breaks ties in favour of the earlier record.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vitalife_core::{Error, Result};

/// Organ system a condition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodySystem {
    Neurological,
    Cardiovascular,
    Respiratory,
    Systemic,
    Digestive,
}

impl BodySystem {
    /// Heart or chest related.
    pub fn is_cardiopulmonary(&self) -> bool {
        matches!(self, Self::Cardiovascular | Self::Respiratory)
    }
}

/// A named ailment with its indicator phrases and advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRecord {
    pub id: String,
    pub name: String,
    /// Direct indicators, lower-case.
    pub symptom_phrases: Vec<String>,
    /// Secondary indicators, lower-case.
    pub related_phrases: Vec<String>,
    pub advice: String,
    #[serde(default)]
    pub is_emergency: bool,
    pub body_system: BodySystem,
}

impl ConditionRecord {
    /// Symptom phrases followed by related phrases.
    pub fn all_phrases(&self) -> impl Iterator<Item = &str> {
        self.symptom_phrases
            .iter()
            .chain(self.related_phrases.iter())
            .map(String::as_str)
    }
}

/// Validated, immutable condition table.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    records: Vec<ConditionRecord>,
}

impl KnowledgeBase {
    /// Validate and wrap a list of records.
    ///
    /// Rejects an empty table, blank or duplicate ids, empty phrase lists,
    /// blank phrases and empty advice. Phrases are lower-cased and trimmed.
    pub fn from_records(records: Vec<ConditionRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::Knowledge("table has no conditions".into()));
        }

        let mut seen = HashSet::new();
        let mut validated = Vec::with_capacity(records.len());

        for (idx, mut record) in records.into_iter().enumerate() {
            let id = record.id.trim().to_string();
            if id.is_empty() {
                return Err(Error::Knowledge(format!("record {} has an empty id", idx)));
            }
            if !seen.insert(id.clone()) {
                return Err(Error::Knowledge(format!("duplicate condition id '{}'", id)));
            }
            if record.advice.trim().is_empty() {
                return Err(Error::Knowledge(format!("'{}' has no advice", id)));
            }

            for (label, phrases) in [
                ("symptomPhrases", &mut record.symptom_phrases),
                ("relatedPhrases", &mut record.related_phrases),
            ] {
                if phrases.is_empty() {
                    return Err(Error::Knowledge(format!("'{}' has no {}", id, label)));
                }
                for phrase in phrases.iter_mut() {
                    let cleaned = phrase.trim().to_lowercase();
                    if cleaned.is_empty() {
                        return Err(Error::Knowledge(format!(
                            "'{}' has a blank entry in {}",
                            id, label
                        )));
                    }
                    *phrase = cleaned;
                }
            }

            if record.name.trim().is_empty() {
                record.name = id.replace('_', " ");
            }
            record.id = id;
            validated.push(record);
        }

        Ok(Self { records: validated })
    }

    /// Parse a JSON array of records.
    pub fn from_json(data: &str) -> Result<Self> {
        let records: Vec<ConditionRecord> = serde_json::from_str(data)?;
        Self::from_records(records)
    }

    /// Load a JSON table from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// The six-condition table shipped with VitaLife.
    pub fn builtin() -> Result<Self> {
        Self::from_records(builtin_records())
    }

    pub fn records(&self) -> &[ConditionRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ConditionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every symptom phrase in table order, duplicates removed.
    pub fn symptom_vocabulary(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .flat_map(|r| r.symptom_phrases.iter().map(String::as_str))
            .filter(|p| seen.insert(*p))
            .collect()
    }

    /// Longest symptom phrase length in bytes.
    pub fn longest_symptom_phrase(&self) -> usize {
        self.records
            .iter()
            .flat_map(|r| r.symptom_phrases.iter())
            .map(String::len)
            .max()
            .unwrap_or(0)
    }
}

fn record(
    id: &str,
    name: &str,
    symptoms: &[&str],
    related: &[&str],
    advice: &str,
    is_emergency: bool,
    body_system: BodySystem,
) -> ConditionRecord {
    ConditionRecord {
        id: id.into(),
        name: name.into(),
        symptom_phrases: symptoms.iter().map(|s| s.to_string()).collect(),
        related_phrases: related.iter().map(|s| s.to_string()).collect(),
        advice: advice.into(),
        is_emergency,
        body_system,
    }
}

fn builtin_records() -> Vec<ConditionRecord> {
    vec![
        record(
            "headache",
            "Headache",
            &["headache", "head pain", "migraine", "tension headache", "head hurts", "throbbing head"],
            &["sensitivity to light", "stiff neck", "blurred vision", "nausea", "pressure behind the eyes"],
            "Rest in a quiet, dark room. Stay hydrated. Consider over-the-counter pain relievers if appropriate.",
            false,
            BodySystem::Neurological,
        ),
        record(
            "chest_pain",
            "Chest Pain",
            &["chest pain", "heart pain", "chest pressure", "chest tightness", "tight chest"],
            &["pain spreading to the arm", "jaw pain", "cold sweat", "shortness of breath", "palpitations"],
            "Seek immediate medical attention for chest pain.",
            true,
            BodySystem::Cardiovascular,
        ),
        record(
            "fever",
            "Fever",
            &["fever", "high temperature", "chills", "feverish", "running a temperature", "burning up"],
            &["sweating", "body aches", "shivering", "loss of appetite", "fatigue"],
            "Rest, stay hydrated, monitor temperature. Seek medical care if fever persists or is very high.",
            false,
            BodySystem::Systemic,
        ),
        record(
            "nausea",
            "Nausea",
            &["nausea", "nauseous", "vomiting", "sick stomach", "queasy", "upset stomach", "throwing up"],
            &["dizziness", "loss of appetite", "stomach cramps", "diarrhea", "dehydration"],
            "Rest, sip clear fluids, try bland foods. Avoid solid foods until feeling better.",
            false,
            BodySystem::Digestive,
        ),
        record(
            "dizziness",
            "Dizziness",
            &["dizziness", "dizzy", "lightheaded", "light-headed", "vertigo", "room spinning"],
            &["nausea", "ringing in the ears", "blurred vision", "unsteadiness", "fainting"],
            "Sit or lie down until it passes and stand up slowly. Drink water. Seek medical care if it keeps coming back or comes with fainting or weakness.",
            false,
            BodySystem::Neurological,
        ),
        record(
            "shortness_of_breath",
            "Shortness of Breath",
            &["shortness of breath", "short of breath", "breathless", "difficulty breathing", "trouble breathing", "out of breath", "wheezing"],
            &["chest tightness", "coughing", "rapid heartbeat", "bluish lips", "fatigue"],
            "Sit upright and try to breathe slowly. Use a prescribed inhaler if you have one. Seek urgent care if it came on suddenly or is getting worse.",
            false,
            BodySystem::Respiratory,
        ),
    ]
}

/// Example prompts offered to new users.
pub const EXAMPLE_PROMPTS: &[&str] = &[
    "I have a severe headache and feel nauseous",
    "Chest pain and shortness of breath",
    "What is normal blood pressure?",
    "How to prevent common cold?",
    "Tired and no energy for days",
    "Sharp pain in abdomen",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(kb.len(), 6);
        let ids: Vec<&str> = kb.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["headache", "chest_pain", "fever", "nausea", "dizziness", "shortness_of_breath"]
        );
        assert!(kb.get("chest_pain").unwrap().is_emergency);
        assert!(kb.get("chest_pain").unwrap().body_system.is_cardiopulmonary());
        assert!(!kb.get("fever").unwrap().body_system.is_cardiopulmonary());
        assert_eq!(kb.longest_symptom_phrase(), "running a temperature".len());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut records = builtin_records();
        records.push(records[0].clone());
        let err = KnowledgeBase::from_records(records).unwrap_err();
        assert!(err.to_string().contains("duplicate condition id 'headache'"));
    }

    #[test]
    fn test_rejects_empty_phrase_lists() {
        let mut records = builtin_records();
        records[2].related_phrases.clear();
        assert!(matches!(
            KnowledgeBase::from_records(records),
            Err(Error::Knowledge(_))
        ));

        let mut records = builtin_records();
        records[1].symptom_phrases.push("   ".into());
        assert!(KnowledgeBase::from_records(records).is_err());

        assert!(KnowledgeBase::from_records(Vec::new()).is_err());
    }

    #[test]
    fn test_phrases_are_lowercased() {
        let kb = KnowledgeBase::from_json(
            r#"[{"id":"rash","name":"","symptomPhrases":[" Itchy Skin "],
                 "relatedPhrases":["Hives"],"advice":"Keep it cool.","bodySystem":"systemic"}]"#,
        )
        .unwrap();
        let rash = kb.get("rash").unwrap();
        assert_eq!(rash.symptom_phrases, vec!["itchy skin"]);
        assert_eq!(rash.related_phrases, vec!["hives"]);
        assert_eq!(rash.name, "rash");
        assert!(!rash.is_emergency);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knowledge.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(KnowledgeBase::load(&path), Err(Error::Knowledge(_))));
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(KnowledgeBase::load(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_vocabulary_deduplicates() {
        let kb = KnowledgeBase::builtin().unwrap();
        let vocab = kb.symptom_vocabulary();
        assert_eq!(vocab[0], "headache");
        let unique: HashSet<&&str> = vocab.iter().collect();
        assert_eq!(unique.len(), vocab.len());
    }
}
