//! Response synthesis: merges the crisis flag, classifier scores and
//! retrieval hits into one `AnalysisResult`.
//!
//! Priority, highest first:
//!   1. crisis override (fixed safety reply, confidence 1.0)
//!   2. curated knowledge answer
//!   3. label template
//!   4. heuristic fallback on the raw text

use mindmate_common::confidence::normalise_confidence;
use mindmate_common::{AnalysisResult, ClassifierScore, KnowledgeEntry};

use crate::error::TriageError;
use crate::fallback::fallback_reply;

pub const SUICIDAL_LABEL: &str = "suicidal";
pub const NEUTRAL_LABEL: &str = "neutral";
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;
pub const UNKNOWN_LABEL: &str = "unknown";

pub const ANALYZE_CRISIS_REPLY: &str =
    "⚠️ I'm really worried by what you said. Call emergency services or a suicide hotline right now.";

/// Coarse category a classifier label falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelCategory {
    Suicidal,
    Stress,
    Anxiety,
    Depression,
}

impl LabelCategory {
    pub fn template(&self) -> &'static str {
        match self {
            LabelCategory::Suicidal => {
                "⚠️ I'm concerned for you. Please contact emergency services or a helpline immediately."
            }
            LabelCategory::Stress => "Seems like stress. Drink water, stretch 3 min, breathe slowly.",
            LabelCategory::Anxiety => {
                "This sounds like anxiety. Try slow breathing: inhale 4, hold 4, exhale 4."
            }
            LabelCategory::Depression => {
                "This feels like depression. Small routines + support can help."
            }
        }
    }
}

// First match wins. A label like "anxiety_stress" resolves to Stress.
const LABEL_RULES: &[(&str, LabelCategory)] = &[
    ("suicid", LabelCategory::Suicidal),
    ("stress", LabelCategory::Stress),
    ("anx", LabelCategory::Anxiety),
    ("depress", LabelCategory::Depression),
];

pub fn category_for_label(label: &str) -> Option<LabelCategory> {
    let label = label.to_lowercase();
    LABEL_RULES
        .iter()
        .find(|(needle, _)| label.contains(needle))
        .map(|(_, category)| *category)
}

pub fn template_for_label(label: &str) -> Option<&'static str> {
    category_for_label(label).map(|c| c.template())
}

/// The fixed result returned whenever the crisis detector fires.
pub fn crisis_result() -> AnalysisResult {
    AnalysisResult {
        label: SUICIDAL_LABEL.to_string(),
        confidence: 1.0,
        reply: ANALYZE_CRISIS_REPLY.to_string(),
        crisis: true,
        knowledge_results: Vec::new(),
        fallback: false,
    }
}

/// Result used when synthesis itself fails.
pub fn degraded_result(text: &str) -> AnalysisResult {
    AnalysisResult {
        label: UNKNOWN_LABEL.to_string(),
        confidence: 0.0,
        reply: fallback_reply(text).to_string(),
        crisis: false,
        knowledge_results: Vec::new(),
        fallback: true,
    }
}

/// Highest-scoring entry; ties keep the classifier's order.
/// Returns `Ok(None)` for an empty list. Labels are not validated here: a
/// blank winner maps to no template and gets the heuristic reply.
pub fn select_top_label(scores: &[ClassifierScore]) -> Result<Option<&ClassifierScore>, TriageError> {
    if let Some(s) = scores.iter().find(|s| !s.score.is_finite()) {
        return Err(TriageError::InvalidScore { label: s.label.clone(), score: s.score });
    }

    let mut ranked: Vec<&ClassifierScore> = scores.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked.first().copied())
}

pub fn synthesize(
    text: &str,
    crisis: bool,
    scores: &[ClassifierScore],
    knowledge: Vec<KnowledgeEntry>,
) -> Result<AnalysisResult, TriageError> {
    if crisis {
        return Ok(crisis_result());
    }

    let (label, raw_confidence) = match select_top_label(scores)? {
        Some(top) => (top.label.clone(), top.score),
        None => (NEUTRAL_LABEL.to_string(), NEUTRAL_CONFIDENCE),
    };

    let reply = match knowledge.first() {
        Some(top) => top.answer.clone(),
        None => template_for_label(&label)
            .unwrap_or_else(|| fallback_reply(text))
            .to_string(),
    };

    // The classifier can flag suicidal intent the keyword scan missed.
    let crisis = label.eq_ignore_ascii_case(SUICIDAL_LABEL);

    Ok(AnalysisResult {
        label,
        confidence: normalise_confidence(raw_confidence),
        reply,
        crisis,
        knowledge_results: knowledge,
        fallback: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::{LISTENING_PROMPT, SLEEP_TIP};

    fn score(label: &str, s: f64) -> ClassifierScore {
        ClassifierScore::new(label, s)
    }

    #[test]
    fn test_crisis_overrides_everything() {
        let kb = vec![KnowledgeEntry::new(1, "q", "curated answer")];
        let r = synthesize("anything", true, &[score("depression", 0.99)], kb).unwrap();
        assert_eq!(r, crisis_result());
        assert_eq!(r.confidence, 1.0);
        assert!(r.knowledge_results.is_empty());
    }

    #[test]
    fn test_empty_scores_default_to_neutral() {
        let r = synthesize("I can't sleep", false, &[], vec![]).unwrap();
        assert_eq!(r.label, NEUTRAL_LABEL);
        assert_eq!(r.confidence, 0.5);
        assert_eq!(r.reply, SLEEP_TIP);
        assert!(!r.crisis);
    }

    #[test]
    fn test_top_label_template_and_rounding() {
        let scores = [score("neutral", 0.1), score("Anxiety", 0.8765), score("stress", 0.02)];
        let r = synthesize("hello there", false, &scores, vec![]).unwrap();
        assert_eq!(r.label, "Anxiety");
        assert_eq!(r.confidence, 0.88);
        assert_eq!(r.reply, LabelCategory::Anxiety.template());
    }

    #[test]
    fn test_unmapped_label_uses_fallback() {
        let r = synthesize("just chatting", false, &[score("joy", 0.9)], vec![]).unwrap();
        assert_eq!(r.reply, LISTENING_PROMPT);
    }

    #[test]
    fn test_knowledge_overrides_template() {
        let kb = vec![
            KnowledgeEntry::new(1, "What is panic?", "first answer"),
            KnowledgeEntry::new(2, "Panic again", "second answer"),
        ];
        let r = synthesize("panic", false, &[score("anxiety", 0.7)], kb).unwrap();
        assert_eq!(r.reply, "first answer");
        assert_eq!(r.knowledge_results.len(), 2);
    }

    #[test]
    fn test_classifier_can_raise_crisis_flag() {
        let r = synthesize("I'm so tired of it all", false, &[score("Suicidal", 0.61)], vec![]).unwrap();
        assert!(r.crisis);
        assert_eq!(r.reply, LabelCategory::Suicidal.template());
    }

    #[test]
    fn test_ties_keep_classifier_order() {
        let scores = [score("depression", 0.4), score("anxiety", 0.4)];
        let top = select_top_label(&scores).unwrap().unwrap();
        assert_eq!(top.label, "depression");
    }

    #[test]
    fn test_label_precedence() {
        assert_eq!(category_for_label("anxiety_stress"), Some(LabelCategory::Stress));
        assert_eq!(category_for_label("suicidal_depression"), Some(LabelCategory::Suicidal));
        assert_eq!(category_for_label("DEPRESSED"), Some(LabelCategory::Depression));
        assert_eq!(category_for_label("neutral"), None);
    }

    #[test]
    fn test_out_of_range_confidence_is_clamped() {
        let r = synthesize("x", false, &[score("depression", 1.7)], vec![]).unwrap();
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn test_non_finite_score_is_an_error() {
        let err = synthesize("x", false, &[score("depression", f64::NAN)], vec![]).unwrap_err();
        assert!(matches!(err, TriageError::InvalidScore { .. }));
    }

    #[test]
    fn test_blank_low_ranked_label_is_ignored() {
        let scores = [score("anxiety", 0.9), score("", 0.01)];
        let r = synthesize("hello there", false, &scores, vec![]).unwrap();
        assert_eq!(r.label, "anxiety");
        assert_eq!(r.confidence, 0.9);
        assert_eq!(r.reply, LabelCategory::Anxiety.template());
        assert!(!r.fallback);
    }

    #[test]
    fn test_blank_top_label_uses_heuristic_reply() {
        let r = synthesize("I can't sleep", false, &[score("", 0.9)], vec![]).unwrap();
        assert_eq!(r.label, "");
        assert_eq!(r.confidence, 0.9);
        assert_eq!(r.reply, SLEEP_TIP);
        assert!(!r.fallback);
    }

    #[test]
    fn test_degraded_result_shape() {
        let r = degraded_result("so much stress");
        assert_eq!(r.label, UNKNOWN_LABEL);
        assert_eq!(r.confidence, 0.0);
        assert!(r.fallback);
        assert!(!r.crisis);
    }
}
