//! Profile-based notes appended to a matched response.

use vitalife_core::UserProfile;

use crate::knowledge::{BodySystem, ConditionRecord};

const HEART_HISTORY: &[&str] = &["heart", "cardiac", "hypertension", "high blood pressure", "angina"];
const LUNG_HISTORY: &[&str] = &["asthma", "copd", "emphysema"];
const DIABETES_HISTORY: &[&str] = &["diabetes", "diabetic"];
const NSAID_ALLERGIES: &[&str] = &["aspirin", "nsaid", "ibuprofen", "naproxen"];

/// Personalization lines for `condition`, in display order.
pub fn personal_notes(
    profile: &UserProfile,
    condition: &ConditionRecord,
    cardiac_age_threshold: u32,
) -> Vec<String> {
    let mut notes = Vec::new();
    let cardiopulmonary = condition.body_system.is_cardiopulmonary();

    let history = profile.medical_history.trim();
    if history.is_empty() {
        notes.push(format!(
            "Given your profile (Age: {}), please consider consulting with your healthcare provider.",
            profile.age
        ));
    } else {
        notes.push(format!(
            "Given your profile (Age: {}) and medical history of {}, please consider consulting with your healthcare provider.",
            profile.age, history
        ));
    }

    if cardiopulmonary && profile.age > cardiac_age_threshold {
        notes.push(format!(
            "At {} years old, heart and chest symptoms deserve prompt evaluation. Do not wait to see if they pass.",
            profile.age
        ));
    }

    if cardiopulmonary && profile.history_mentions(HEART_HISTORY) {
        notes.push(
            "Your history of heart disease or high blood pressure raises the importance of getting checked today."
                .to_string(),
        );
    }

    if condition.body_system == BodySystem::Respiratory && profile.history_mentions(LUNG_HISTORY) {
        notes.push(
            "With asthma or another lung condition, follow your action plan and use your rescue inhaler as prescribed."
                .to_string(),
        );
    }

    if !cardiopulmonary && profile.history_mentions(DIABETES_HISTORY) {
        notes.push(
            "With diabetes, check your blood sugar. Illness, vomiting and dizziness can all be signs that it is out of range."
                .to_string(),
        );
    }

    let allergies = profile.allergy_list();
    if !allergies.is_empty() {
        let takes_painkillers = matches!(condition.id.as_str(), "headache" | "fever");
        if takes_painkillers && profile.allergic_to_any(NSAID_ALLERGIES) {
            notes.push(
                "You listed an aspirin/NSAID allergy: avoid aspirin, ibuprofen and naproxen, and ask a pharmacist about safe alternatives."
                    .to_string(),
            );
        } else {
            notes.push(format!(
                "Check any over-the-counter medication against your listed allergies ({}).",
                allergies.join(", ")
            ));
        }
    }

    let medications = profile.medication_list();
    if !medications.is_empty() {
        notes.push(format!(
            "You listed current medications ({}): ask a pharmacist before adding any over-the-counter remedy.",
            medications.join(", ")
        ));
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;

    fn condition(id: &str) -> ConditionRecord {
        KnowledgeBase::builtin().unwrap().get(id).unwrap().clone()
    }

    #[test]
    fn test_base_note_only() {
        let profile = UserProfile::new("Ada", 30);
        let notes = personal_notes(&profile, &condition("headache"), 50);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("Age: 30"));
    }

    #[test]
    fn test_cardiac_age_threshold() {
        let at_threshold = UserProfile::new("Bo", 50);
        assert_eq!(personal_notes(&at_threshold, &condition("chest_pain"), 50).len(), 1);

        let older = UserProfile::new("Bo", 51);
        let notes = personal_notes(&older, &condition("shortness_of_breath"), 50);
        assert!(notes.iter().any(|n| n.contains("51 years old")));

        // Age note is limited to heart and chest conditions
        assert_eq!(personal_notes(&older, &condition("fever"), 50).len(), 1);
    }

    #[test]
    fn test_history_gates() {
        let mut profile = UserProfile::new("Cy", 40);
        profile.medical_history = "Asthma, Hypertension".into();
        let notes = personal_notes(&profile, &condition("shortness_of_breath"), 50);
        assert!(notes[0].contains("medical history of Asthma, Hypertension"));
        assert!(notes.iter().any(|n| n.contains("high blood pressure")));
        assert!(notes.iter().any(|n| n.contains("inhaler")));

        profile.medical_history = "type 1 diabetes".into();
        let notes = personal_notes(&profile, &condition("nausea"), 50);
        assert!(notes.iter().any(|n| n.contains("blood sugar")));
    }

    #[test]
    fn test_medication_note() {
        let mut profile = UserProfile::new("Ez", 45);
        profile.medications = " warfarin , , metformin".into();
        let notes = personal_notes(&profile, &condition("fever"), 50);
        assert_eq!(notes.len(), 2);
        assert!(notes[1].contains("(warfarin, metformin)"));
        assert!(notes[1].contains("over-the-counter"));

        profile.medications = "  ".into();
        assert_eq!(personal_notes(&profile, &condition("fever"), 50).len(), 1);
    }

    #[test]
    fn test_allergy_notes() {
        let mut profile = UserProfile::new("Di", 25);
        profile.allergies = "Ibuprofen".into();
        let notes = personal_notes(&profile, &condition("headache"), 50);
        assert!(notes.iter().any(|n| n.contains("NSAID allergy")));

        profile.allergies = "penicillin, latex".into();
        let notes = personal_notes(&profile, &condition("headache"), 50);
        assert!(notes.iter().any(|n| n.contains("(penicillin, latex)")));
    }
}
