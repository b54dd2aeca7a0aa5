//! VitaLife Triage — symptom matching and response building.
//!
//! `Normalizer` rewrites free text into a canonical symptom phrase using
//! ordered regex rules and phrase counts. `Composer` checks the raw
//! text for emergencies, scores the knowledge table, and renders advice.
//! Both are plain heuristics over a six-entry table.

pub mod compose;
pub mod emergency;
pub mod engine;
pub mod knowledge;
pub mod normalize;
pub mod personalize;
pub mod rules;
pub mod suggest;
pub mod types;

pub use compose::Composer;
pub use engine::{EngineStatus, TriageEngine};
pub use knowledge::{BodySystem, ConditionRecord, KnowledgeBase, EXAMPLE_PROMPTS};
pub use normalize::Normalizer;
pub use types::*;
