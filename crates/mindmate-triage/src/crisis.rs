//! Crisis keyword detection.
//!
//! Plain case-insensitive substring matching with no scoring and no negation
//! handling. "I would never kill myself" is flagged; false positives are the
//! accepted cost of never missing a true one.

/// Phrases that force the crisis override.
pub const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "want to die",
    "hurt myself",
    "end my life",
    "i cant go on",
    "i can't go on",
    "cut myself",
    "overdose",
    "hang myself",
];

/// Returns the first crisis phrase found in `text`, if any.
pub fn matched_phrase(text: &str) -> Option<&'static str> {
    // Typographic apostrophes from mobile keyboards.
    let s = text.to_lowercase().replace('\u{2019}', "'");
    CRISIS_PHRASES.iter().copied().find(|phrase| s.contains(phrase))
}

pub fn is_crisis(text: &str) -> bool {
    matched_phrase(text).is_some()
}
