//! Emergency detection on the raw, un-normalized input.

/// Phrases that always mean "call emergency services".
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "heart attack",
    "can't breathe",
    "cannot breathe",
    "severe pain",
    "unconscious",
    "bleeding heavily",
    "overdose",
    "suicide",
    "stroke",
    "seizure",
];

/// Intensifiers that escalate any complaint.
pub const SEVERITY_INTENSIFIERS: &[&str] = &[
    "unbearable",
    "excruciating",
    "worst pain",
    "crushing",
    "passing out",
];

pub const EMERGENCY_MESSAGE: &str = "EMERGENCY DETECTED\n\n\
This appears to be a medical emergency. Please:\n\
\u{2022} Call emergency services immediately (911/999/local emergency number)\n\
\u{2022} Seek immediate medical attention\n\
\u{2022} Do not delay professional medical care\n\n\
This service cannot provide emergency medical treatment.";

/// First emergency keyword or intensifier found in `raw_text`.
pub fn detect_emergency(raw_text: &str) -> Option<&'static str> {
    let lower = raw_text.to_lowercase();
    EMERGENCY_KEYWORDS
        .iter()
        .chain(SEVERITY_INTENSIFIERS.iter())
        .find(|kw| lower.contains(*kw))
        .copied()
}
