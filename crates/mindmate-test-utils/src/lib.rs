//! Shared fixtures for MindMate integration tests.
//!
//! - sample knowledge / doctor / sleep-tip records
//! - `ScriptedClassifier`, a `TextClassifier` that answers from a script
//!   and counts how often it was called

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use mindmate_common::{ClassifierScore, Doctor, KnowledgeEntry, RecordId, SleepTip};
use mindmate_triage::{Catalog, GatewayError, TextClassifier, Triage};
use serde_json::json;

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// Small knowledge base. No entry mentions sleep, so sleep queries fall
/// through to the heuristic reply.
pub fn sample_knowledge() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::new(1, "What is a panic attack?", "A panic attack is a sudden surge of intense fear that peaks within minutes."),
        KnowledgeEntry::new(2, "How do I calm down quickly?", "Slow, deep breathing and naming five things around you helps during panic."),
        KnowledgeEntry::new(3, "What are signs of burnout?", "Exhaustion, cynicism and reduced performance at work or study."),
        KnowledgeEntry::new(4, "Is it normal to feel lonely?", "Loneliness is common; reaching out to one person is a good first step."),
    ]
}

pub fn sample_doctors() -> Vec<Doctor> {
    let doctor = |id: i64, name: &str, specialty: &str, number: &str| Doctor {
        id: RecordId::from(id),
        name: name.to_string(),
        specialty: specialty.to_string(),
        number: number.to_string(),
        extra: Default::default(),
    };
    vec![
        doctor(1, "Tele-MANAS", "Mental Health Helpline", "14416"),
        doctor(2, "Dr. A. Rao", "Psychiatrist", "+91-0000000001"),
        doctor(3, "Dr. S. Iyer", "Clinical Psychologist", "+91-0000000002"),
        doctor(4, "Dr. M. Khan", "Sleep Specialist", "+91-0000000003"),
    ]
}

pub fn sample_sleep_tips() -> Vec<SleepTip> {
    vec![
        SleepTip(json!({"id": 1, "title": "Wind down", "tip": "Dim the lights an hour before bed."})),
        SleepTip(json!({"id": 2, "title": "Same time", "tip": "Wake up at the same time every day."})),
    ]
}

pub fn sample_catalog() -> Catalog {
    Catalog::new(sample_knowledge(), sample_doctors(), sample_sleep_tips())
}

pub fn triage_with(classifier: Arc<ScriptedClassifier>) -> Triage {
    Triage::from_catalog(&sample_catalog(), classifier)
}

// ── Scripted classifier ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Script {
    Scores(Vec<ClassifierScore>),
    Unavailable,
}

/// Deterministic stand-in for the remote classifier.
#[derive(Debug)]
pub struct ScriptedClassifier {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    pub fn scores(scores: Vec<(&str, f64)>) -> Arc<Self> {
        let scores = scores.into_iter().map(|(l, s)| ClassifierScore::new(l, s)).collect();
        Arc::new(Self { script: Script::Scores(scores), calls: AtomicUsize::new(0) })
    }

    /// Always fails, as a down or misconfigured remote service would.
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self { script: Script::Unavailable, calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextClassifier for ScriptedClassifier {
    async fn classify(&self, _text: &str) -> Result<Vec<ClassifierScore>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Scores(scores) => Ok(scores.clone()),
            Script::Unavailable => Err(GatewayError::Remote("scripted outage".to_string())),
        }
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}
