//! Core record types shared by the triage pipeline and the HTTP surface.
//! Field names on the wire follow the JSON data files and the web client.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Record identifiers
// ---------------------------------------------------------------------------

/// Identifier carried by static records. The data files use both numeric
/// and string ids, so either is accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        RecordId::Number(n.into())
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Knowledge base
// ---------------------------------------------------------------------------

/// A curated question/answer pair from `knowledge.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    #[serde(default)]
    pub id: RecordId,
    #[serde(rename = "q", alias = "question", default)]
    pub question: String,
    #[serde(rename = "a", alias = "answer", default)]
    pub answer: String,
}

impl KnowledgeEntry {
    pub fn new(id: impl Into<RecordId>, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reference directories
// ---------------------------------------------------------------------------

/// A helpline / specialist contact from `doctors.json`.
/// Fields the core does not know about are kept in `extra` and written back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub number: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A sleep routine entry from `sleep_tips.json`; never inspected by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SleepTip(pub Value);

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// One label/probability pair reported by the remote text classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierScore {
    pub label: String,
    pub score: f64,
}

impl ClassifierScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self { label: label.into(), score }
    }
}

/// Synthesized reply for a single free-text query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub label: String,
    /// Top-label probability, in `[0, 1]`, rounded to 2 decimals.
    pub confidence: f64,
    pub reply: String,
    pub crisis: bool,
    #[serde(default)]
    pub knowledge_results: Vec<KnowledgeEntry>,
    /// Set only on the degraded path, when synthesis itself failed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

// ---------------------------------------------------------------------------
// Self-check
// ---------------------------------------------------------------------------

/// Overall urgency of a self-check, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThreatLevel {
    Low,
    Moderate,
    High,
    Emergency,
}

impl ThreatLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Low       => "Low",
            ThreatLevel::Moderate  => "Moderate",
            ThreatLevel::High      => "High",
            ThreatLevel::Emergency => "Emergency",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionScore {
    pub name: String,
    pub score: f64,
}

/// `AnalysisResult` extended with the guided questionnaire outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfCheckReport {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub conditions: Vec<ConditionScore>,
    pub threat_level: ThreatLevel,
    pub recommended: Vec<String>,
    pub advice: Vec<String>,
    pub doctors: Vec<Doctor>,
}
