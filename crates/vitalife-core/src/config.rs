//! Configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which lemmatizer backend to load at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "path")]
pub enum LemmatizerMode {
    /// Built-in suffix rules.
    Rules,
    /// `form<TAB>lemma` lexicon file, rules as fallback for unknown words.
    Lexicon(PathBuf),
    /// No lemmatization; normalizer and similarity layer are skipped.
    Disabled,
}

/// Top-level VitaLife configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitaLifeConfig {
    /// HTTP server port.
    pub port: u16,
    /// Lemmatizer backend.
    pub lemmatizer: LemmatizerMode,
    /// Load attempts for the lexicon resource before degrading.
    pub lexicon_retries: u32,
    /// Fixed delay between lexicon load attempts.
    pub lexicon_retry_delay: Duration,
    /// Optional JSON knowledge table replacing the builtin one.
    pub knowledge_path: Option<PathBuf>,
    /// Number of chat turns shown in the history view.
    pub history_view: usize,
    /// Maximum live sessions before the oldest is evicted.
    pub max_sessions: usize,
}

impl Default for VitaLifeConfig {
    fn default() -> Self {
        Self {
            port: 8501,
            lemmatizer: LemmatizerMode::Rules,
            lexicon_retries: 3,
            lexicon_retry_delay: Duration::from_millis(2000),
            knowledge_path: None,
            history_view: 10,
            max_sessions: 100,
        }
    }
}

impl VitaLifeConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let parse_or = |key: &str, fallback: u64| -> u64 {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(fallback)
        };

        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        let lexicon_path = lookup("VITALIFE_LEXICON")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let lemmatizer = match lookup("VITALIFE_LEMMATIZER").as_deref().map(str::trim) {
            None | Some("") => match lexicon_path {
                Some(path) => LemmatizerMode::Lexicon(path),
                None => LemmatizerMode::Rules,
            },
            Some("rules") => LemmatizerMode::Rules,
            Some("none") | Some("disabled") => LemmatizerMode::Disabled,
            Some("lexicon") => match lexicon_path {
                Some(path) => LemmatizerMode::Lexicon(path),
                None => {
                    return Err(Error::Config(
                        "VITALIFE_LEMMATIZER=lexicon requires VITALIFE_LEXICON".into(),
                    ))
                }
            },
            Some(other) => {
                return Err(Error::Config(format!(
                    "unknown lemmatizer '{}' (expected rules, lexicon or none)",
                    other
                )))
            }
        };

        Ok(Self {
            port,
            lemmatizer,
            lexicon_retries: parse_or("VITALIFE_LEXICON_RETRIES", defaults.lexicon_retries as u64)
                .max(1) as u32,
            lexicon_retry_delay: Duration::from_millis(parse_or(
                "VITALIFE_LEXICON_RETRY_DELAY_MS",
                defaults.lexicon_retry_delay.as_millis() as u64,
            )),
            knowledge_path: lookup("VITALIFE_KNOWLEDGE")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            history_view: parse_or("VITALIFE_HISTORY_VIEW", defaults.history_view as u64) as usize,
            max_sessions: parse_or("VITALIFE_MAX_SESSIONS", defaults.max_sessions as u64).max(1)
                as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<VitaLifeConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        VitaLifeConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8501);
        assert_eq!(config.lemmatizer, LemmatizerMode::Rules);
        assert_eq!(config.lexicon_retries, 3);
        assert_eq!(config.history_view, 10);
        assert!(config.knowledge_path.is_none());
    }

    #[test]
    fn test_lexicon_path_implies_lexicon_mode() {
        let config = config_from(&[("VITALIFE_LEXICON", "/tmp/lemmas.tsv")]).unwrap();
        assert_eq!(
            config.lemmatizer,
            LemmatizerMode::Lexicon(PathBuf::from("/tmp/lemmas.tsv"))
        );
    }

    #[test]
    fn test_disabled_and_overrides() {
        let config = config_from(&[
            ("VITALIFE_LEMMATIZER", "none"),
            ("PORT", "9000"),
            ("VITALIFE_LEXICON_RETRIES", "0"),
            ("VITALIFE_LEXICON_RETRY_DELAY_MS", "5"),
        ])
        .unwrap();
        assert_eq!(config.lemmatizer, LemmatizerMode::Disabled);
        assert_eq!(config.port, 9000);
        // At least one attempt is always made
        assert_eq!(config.lexicon_retries, 1);
        assert_eq!(config.lexicon_retry_delay, Duration::from_millis(5));
    }

    #[test]
    fn test_invalid_lemmatizer() {
        assert!(matches!(
            config_from(&[("VITALIFE_LEMMATIZER", "spacy")]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            config_from(&[("VITALIFE_LEMMATIZER", "lexicon")]),
            Err(Error::Config(_))
        ));
    }
}
