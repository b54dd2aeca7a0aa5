//! User profile model and validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Highest accepted age in years.
pub const MAX_AGE: u32 = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    PreferNotToSay,
    Female,
    Male,
    Other,
}

/// ABO/Rh blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl std::fmt::Display for BloodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        };
        write!(f, "{}", label)
    }
}

/// A user's self-reported profile. Saved profiles replace earlier ones
/// wholesale; nothing is merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<BloodType>,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub medications: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            gender: Gender::default(),
            height_cm: None,
            weight_kg: None,
            blood_type: None,
            medical_history: String::new(),
            medications: String::new(),
            allergies: String::new(),
            last_updated: Utc::now(),
        }
    }

    /// Reject out-of-range values before a profile is stored.
    pub fn validate(&self) -> Result<()> {
        if self.age > MAX_AGE {
            return Err(Error::InvalidProfile(format!(
                "age {} is outside 0-{}",
                self.age, MAX_AGE
            )));
        }
        for (field, value) in [("heightCm", self.height_cm), ("weightKg", self.weight_kg)] {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(Error::InvalidProfile(format!(
                        "{} must be a positive number, got {}",
                        field, v
                    )));
                }
            }
        }
        Ok(())
    }

    /// Body mass index, when both height and weight are known.
    pub fn bmi(&self) -> Option<f64> {
        let height_m = self.height_cm? / 100.0;
        let weight = self.weight_kg?;
        Some(weight / (height_m * height_m))
    }

    /// Case-insensitive check of the medical history against any of `terms`.
    pub fn history_mentions(&self, terms: &[&str]) -> bool {
        let history = self.medical_history.to_lowercase();
        terms.iter().any(|t| history.contains(t))
    }

    /// Case-insensitive check of the allergy list against any of `terms`.
    pub fn allergic_to_any(&self, terms: &[&str]) -> bool {
        let allergies = self.allergies.to_lowercase();
        terms.iter().any(|t| allergies.contains(t))
    }

    /// Allergies split on commas, trimmed, blanks dropped.
    pub fn allergy_list(&self) -> Vec<String> {
        split_list(&self.allergies)
    }

    pub fn medication_list(&self) -> Vec<String> {
        split_list(&self.medications)
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_age_bounds() {
        assert!(UserProfile::new("Ada", 120).validate().is_ok());
        assert!(matches!(
            UserProfile::new("Ada", 121).validate(),
            Err(Error::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_validate_vitals() {
        let mut profile = UserProfile::new("Ada", 40);
        profile.height_cm = Some(0.0);
        assert!(profile.validate().is_err());
        profile.height_cm = Some(170.0);
        profile.weight_kg = Some(f64::NAN);
        assert!(profile.validate().is_err());
        profile.weight_kg = Some(65.0);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_bmi() {
        let mut profile = UserProfile::new("Ada", 40);
        assert!(profile.bmi().is_none());
        profile.height_cm = Some(200.0);
        profile.weight_kg = Some(80.0);
        assert!((profile.bmi().unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_lists_and_mentions() {
        let mut profile = UserProfile::new("Ada", 40);
        profile.allergies = "Penicillin, , Aspirin ".into();
        profile.medical_history = "Type 2 Diabetes, hypertension".into();
        assert_eq!(profile.allergy_list(), vec!["Penicillin", "Aspirin"]);
        assert!(profile.allergic_to_any(&["aspirin"]));
        assert!(profile.history_mentions(&["diabetes"]));
        assert!(!profile.history_mentions(&["asthma"]));
    }

    #[test]
    fn test_serde_field_names() {
        let mut profile = UserProfile::new("Ada", 40);
        profile.blood_type = Some(BloodType::AbNegative);
        profile.gender = Gender::PreferNotToSay;
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["bloodType"], "AB-");
        assert_eq!(json["gender"], "prefer_not_to_say");
        assert!(json["lastUpdated"].is_string());
        assert!(json.get("heightCm").is_none());

        let parsed: UserProfile =
            serde_json::from_str(r#"{"name":"Bo","age":33,"bloodType":"O+"}"#).unwrap();
        assert_eq!(parsed.blood_type, Some(BloodType::OPositive));
        assert_eq!(parsed.gender, Gender::PreferNotToSay);
    }
}
