//! VitaLife Lexicon — lemmatizer backends and startup loading.
//!
//! Provides the `Lemmatizer` trait used by the normalizer and composer.
//! `RuleLemmatizer` needs no resources; `LexiconLemmatizer` loads a lemma
//! table from disk with bounded retries. If the lexicon never loads the
//! loader degrades to the rules instead of stopping the process, and
//! `NoopLemmatizer` switches lemmatization off entirely.

pub mod lemmatizer;
pub mod lexicon;
pub mod rules;

pub use lemmatizer::{tokenize, Lemmatizer, NoopLemmatizer, MIN_LEMMA_SIMILARITY};
pub use lexicon::LexiconLemmatizer;
pub use rules::{rule_lemma, RuleLemmatizer};

use std::sync::Arc;
use std::time::Duration;

use vitalife_core::{LemmatizerMode, Result};

/// Create the lemmatizer selected by `mode`.
///
/// Lexicon loading is attempted `attempts` times with `delay` between
/// attempts, then falls back to `RuleLemmatizer`.
pub fn create_lemmatizer(
    mode: &LemmatizerMode,
    attempts: u32,
    delay: Duration,
) -> Arc<dyn Lemmatizer> {
    match mode {
        LemmatizerMode::Disabled => {
            tracing::info!("Lemmatizer disabled. Normalizer uses plain lower-cased text.");
            Arc::new(NoopLemmatizer)
        }
        LemmatizerMode::Rules => {
            tracing::info!("Using rule-based lemmatizer");
            Arc::new(RuleLemmatizer::new())
        }
        LemmatizerMode::Lexicon(path) => {
            match load_with_retry(attempts, delay, |_| LexiconLemmatizer::load(path)) {
                Ok(lexicon) => {
                    tracing::info!(
                        "Using lexicon lemmatizer ({} entries from {})",
                        lexicon.len(),
                        path.display()
                    );
                    Arc::new(lexicon)
                }
                Err(e) => {
                    tracing::warn!(
                        "Lexicon unavailable after {} attempts: {}. Falling back to rule-based lemmatizer.",
                        attempts.max(1),
                        e
                    );
                    Arc::new(RuleLemmatizer::new())
                }
            }
        }
    }
}

/// Run `load` up to `attempts` times (at least once), sleeping `delay`
/// between failures. Returns the last error if every attempt fails.
pub fn load_with_retry<T, F>(attempts: u32, delay: Duration, mut load: F) -> Result<T>
where
    F: FnMut(u32) -> Result<T>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match load(attempt) {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                tracing::warn!("Load attempt {}/{} failed: {}", attempt, attempts, e);
                std::thread::sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
