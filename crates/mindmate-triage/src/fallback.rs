//! Heuristic fallback replies used when no classifier label maps to a template.
//!
//! The cascade is data: an ordered list of (topic, pattern) rules evaluated
//! first-match-wins against the raw text, with `General` as the catch-all.

use std::sync::LazyLock;

use regex::Regex;

pub const SLEEP_TIP: &str =
    "Try 4-4-4 breathing, low lights, and no screens 1 hour before sleep.";
pub const ANXIETY_TIP: &str =
    "Pause. Inhale 4s — hold 4s — exhale 4s. You're safe here.";
pub const LOW_MOOD_TIP: &str =
    "Small steps help: sunlight, movement, journaling, and talking to someone you trust.";
pub const LISTENING_PROMPT: &str = "I'm listening. Tell me a bit more.";

/// Coarse topic recognised by the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTopic {
    Sleep,
    Anxiety,
    LowMood,
    General,
}

impl FallbackTopic {
    pub fn reply(&self) -> &'static str {
        match self {
            FallbackTopic::Sleep   => SLEEP_TIP,
            FallbackTopic::Anxiety => ANXIETY_TIP,
            FallbackTopic::LowMood => LOW_MOOD_TIP,
            FallbackTopic::General => LISTENING_PROMPT,
        }
    }
}

struct FallbackRule {
    topic: FallbackTopic,
    pattern: Regex,
}

// Order matters: "can't sleep because of stress" is a sleep question.
static RULES: LazyLock<Vec<FallbackRule>> = LazyLock::new(|| {
    vec![
        FallbackRule {
            topic: FallbackTopic::Sleep,
            pattern: Regex::new(r"(?i)sleep|insomnia").expect("Invalid regex: sleep pattern"),
        },
        FallbackRule {
            topic: FallbackTopic::Anxiety,
            pattern: Regex::new(r"(?i)anx|panic|stress").expect("Invalid regex: anxiety pattern"),
        },
        FallbackRule {
            topic: FallbackTopic::LowMood,
            pattern: Regex::new(r"(?i)depress|sad|hopeless").expect("Invalid regex: low mood pattern"),
        },
    ]
});

pub fn classify_topic(text: &str) -> FallbackTopic {
    RULES
        .iter()
        .find(|rule| rule.pattern.is_match(text))
        .map(|rule| rule.topic)
        .unwrap_or(FallbackTopic::General)
}

pub fn fallback_reply(text: &str) -> &'static str {
    classify_topic(text).reply()
}
