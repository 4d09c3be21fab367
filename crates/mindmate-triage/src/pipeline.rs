//! Per-request entry points: analyze, genai and selfcheck.
//!
//! Every path answers. Input problems become a soft error object, a failing
//! classifier becomes an empty score list, and a synthesis fault becomes the
//! degraded result.

use std::sync::Arc;

use mindmate_common::{AnalysisResult, Doctor, KnowledgeEntry, SelfCheckReport, ThreatLevel};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::classifier::TextClassifier;
use crate::crisis;
use crate::fallback::{fallback_reply, LISTENING_PROMPT};
use crate::knowledge::KnowledgeStore;
use crate::selfcheck::{self, SelfCheckRequest};
use crate::store::Catalog;
use crate::synthesizer::{self, NEUTRAL_CONFIDENCE, NEUTRAL_LABEL};

pub const EMPTY_INPUT_ERROR: &str = "empty";
pub const EMPTY_INPUT_REPLY: &str = "Say something first 💜";
pub const GENAI_CRISIS_REPLY: &str =
    "⚠️ This sounds serious. If you're in danger, call emergency services immediately.";

/// Response of `/api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyzeOutcome {
    EmptyInput { error: String, reply: String },
    Analysis(AnalysisResult),
}

impl AnalyzeOutcome {
    pub fn empty_input() -> Self {
        AnalyzeOutcome::EmptyInput {
            error: EMPTY_INPUT_ERROR.to_string(),
            reply: EMPTY_INPUT_REPLY.to_string(),
        }
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        match self {
            AnalyzeOutcome::Analysis(result) => Some(result),
            AnalyzeOutcome::EmptyInput { .. } => None,
        }
    }
}

/// Response of `/api/genai`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenAiReply {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_results: Option<Vec<KnowledgeEntry>>,
}

/// Shared triage engine. Cheap to clone; all state is behind `Arc`.
#[derive(Clone)]
pub struct Triage {
    knowledge: Arc<KnowledgeStore>,
    doctors: Arc<Vec<Doctor>>,
    classifier: Arc<dyn TextClassifier>,
}

impl Triage {
    pub fn new(
        knowledge: Arc<KnowledgeStore>,
        doctors: Arc<Vec<Doctor>>,
        classifier: Arc<dyn TextClassifier>,
    ) -> Self {
        Self { knowledge, doctors, classifier }
    }

    pub fn from_catalog(catalog: &Catalog, classifier: Arc<dyn TextClassifier>) -> Self {
        Self::new(catalog.knowledge.clone(), catalog.doctors.clone(), classifier)
    }

    pub fn knowledge(&self) -> &KnowledgeStore {
        &self.knowledge
    }

    pub async fn analyze(&self, text: &str) -> AnalyzeOutcome {
        if text.is_empty() {
            return AnalyzeOutcome::empty_input();
        }
        AnalyzeOutcome::Analysis(self.analyze_text(text).await)
    }

    async fn analyze_text(&self, text: &str) -> AnalysisResult {
        if let Some(phrase) = crisis::matched_phrase(text) {
            warn!(phrase, "Crisis phrase detected, returning safety reply");
            return synthesizer::crisis_result();
        }

        let scores = match self.classifier.classify(text).await {
            Ok(scores) => scores,
            Err(e) => {
                warn!(model = self.classifier.model_id(), error = %e, "Classifier unavailable, using fallback analyze");
                Vec::new()
            }
        };

        let knowledge = self.knowledge.search(text);
        match synthesizer::synthesize(text, false, &scores, knowledge) {
            Ok(result) => {
                info!(
                    label = %result.label,
                    confidence = result.confidence,
                    crisis = result.crisis,
                    knowledge = result.knowledge_results.len(),
                    "Analyzed text"
                );
                result
            }
            Err(e) => {
                error!(error = %e, "Analyze synthesis failed, returning degraded result");
                synthesizer::degraded_result(text)
            }
        }
    }

    /// Classifier-free reply: crisis override, then knowledge, then heuristics.
    pub fn genai(&self, prompt: &str) -> GenAiReply {
        if crisis::is_crisis(prompt) {
            warn!("Crisis phrase detected in genai prompt");
            return GenAiReply {
                reply: GENAI_CRISIS_REPLY.to_string(),
                crisis: Some(true),
                knowledge_results: None,
            };
        }

        let hits = self.knowledge.search(prompt);
        let reply = match hits.first() {
            Some(top) => top.answer.clone(),
            None => fallback_reply(prompt).to_string(),
        };
        GenAiReply { reply, crisis: None, knowledge_results: Some(hits) }
    }

    pub async fn selfcheck(&self, request: &SelfCheckRequest) -> SelfCheckReport {
        let text = request.text.as_str();
        let text_analysis = if text.is_empty() {
            None
        } else {
            Some(self.analyze_text(text).await)
        };

        let assessment =
            selfcheck::assess(&request.answers, text, text_analysis.as_ref(), &self.doctors);

        let analysis = if assessment.threat_level == ThreatLevel::Emergency {
            synthesizer::crisis_result()
        } else {
            text_analysis.unwrap_or_else(neutral_result)
        };

        info!(
            threat_level = assessment.threat_level.as_str(),
            conditions = assessment.conditions.len(),
            "Self-check scored"
        );

        SelfCheckReport {
            analysis,
            conditions: assessment.conditions,
            threat_level: assessment.threat_level,
            recommended: assessment.recommended,
            advice: assessment.advice,
            doctors: assessment.doctors,
        }
    }
}

fn neutral_result() -> AnalysisResult {
    AnalysisResult {
        label: NEUTRAL_LABEL.to_string(),
        confidence: NEUTRAL_CONFIDENCE,
        reply: LISTENING_PROMPT.to_string(),
        crisis: false,
        knowledge_results: Vec::new(),
        fallback: false,
    }
}
