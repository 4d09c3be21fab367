//! Guided self-check scoring.
//!
//! Turns the questionnaire answers (plus the optional free-text analysis)
//! into condition scores, an overall threat level, recommended specialists,
//! short advice lines and matching directory contacts.
//!
//! Scoring, per condition:
//!   base     from the direct answer (mood, anxiety, sleep, self-harm)
//!   + sleep  disturbed sleep raises depression; short sleep raises anxiety
//!   + time   duration >= 14/30/90 days adds 0.05/0.10/0.15
//!   + impact function impairment 0..5 adds up to 0.15
//!   + text   a mapped classifier label adds 0.2 x confidence, otherwise the
//!            heuristic topic adds 0.1
//! Amplifiers only touch conditions that already have a base score.
//! Self-harm is never amplified; any crisis signal in the text sets it to 1.0.

use mindmate_common::confidence::{clamp_unit, normalise_confidence};
use mindmate_common::{AnalysisResult, ConditionScore, Doctor, ThreatLevel};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::fallback::{self, FallbackTopic};
use crate::synthesizer::{category_for_label, LabelCategory};

pub const DEPRESSION: &str = "Depression";
pub const ANXIETY: &str = "Anxiety";
pub const SLEEP_DISTURBANCE: &str = "Sleep Disturbance";
pub const SELF_HARM: &str = "Self-harm Risk";

/// Conditions below this score are not reported.
pub const REPORT_THRESHOLD: f64 = 0.30;

const HIGH_THRESHOLD: f64 = 0.75;
const MODERATE_THRESHOLD: f64 = 0.45;
const SELF_HARM_HIGH: f64 = 0.6;
const MAX_IMPAIRMENT: u32 = 5;

// ── Request ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Depressed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepPattern {
    Normal,
    Less,
    More,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnxietyLevel {
    None,
    Mild,
    High,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfHarmAnswer {
    No,
    Maybe,
    Yes,
    #[serde(other)]
    Unknown,
}

/// Questionnaire answers. Every field is optional; absent means no signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfCheckAnswers {
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub sleep: Option<SleepPattern>,
    #[serde(default)]
    pub anxiety: Option<AnxietyLevel>,
    #[serde(default)]
    pub suicidal: Option<SelfHarmAnswer>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub duration_days: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub function_impairment: Option<u32>,
}

/// Accepts `30`, `30.0` or `"30"`; anything else is treated as absent.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.is_finite()).map(|f| f as u64))
            .map(|n| n.min(u32::MAX as u64) as u32),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfCheckRequest {
    #[serde(default)]
    pub answers: SelfCheckAnswers,
    #[serde(default)]
    pub text: String,
}

// ── Specialists ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specialist {
    EmergencyServices,
    Psychiatrist,
    ClinicalPsychologist,
    SleepSpecialist,
    Counsellor,
}

impl Specialist {
    pub fn title(&self) -> &'static str {
        match self {
            Specialist::EmergencyServices    => "Emergency Services",
            Specialist::Psychiatrist         => "Psychiatrist",
            Specialist::ClinicalPsychologist => "Clinical Psychologist",
            Specialist::SleepSpecialist      => "Sleep Specialist",
            Specialist::Counsellor           => "Counsellor",
        }
    }

    /// Lower-case fragments matched against a directory entry's specialty.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Specialist::EmergencyServices    => &["emergency", "helpline", "crisis"],
            Specialist::Psychiatrist         => &["psychiatr"],
            Specialist::ClinicalPsychologist => &["psycholog"],
            Specialist::SleepSpecialist      => &["sleep"],
            Specialist::Counsellor           => &["counsel"],
        }
    }

    pub fn matches(&self, doctor: &Doctor) -> bool {
        let specialty = doctor.specialty.to_lowercase();
        self.keywords().iter().any(|k| specialty.contains(k))
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct RawScores {
    depression: f64,
    anxiety: f64,
    sleep: f64,
    self_harm: f64,
}

impl RawScores {
    fn from_answers(answers: &SelfCheckAnswers) -> Self {
        let depression = match answers.mood {
            Some(Mood::Depressed) => 0.55,
            Some(Mood::Neutral) => 0.2,
            _ => 0.0,
        };
        let anxiety = match answers.anxiety {
            Some(AnxietyLevel::High) => 0.6,
            Some(AnxietyLevel::Mild) => 0.3,
            _ => 0.0,
        };
        let sleep = match answers.sleep {
            Some(SleepPattern::Less) => 0.5,
            Some(SleepPattern::More) => 0.4,
            _ => 0.0,
        };
        let self_harm = match answers.suicidal {
            Some(SelfHarmAnswer::Yes) => 1.0,
            Some(SelfHarmAnswer::Maybe) => 0.6,
            _ => 0.0,
        };
        let mut scores = Self { depression, anxiety, sleep, self_harm };

        let disturbed = matches!(answers.sleep, Some(SleepPattern::Less | SleepPattern::More));
        if disturbed && scores.depression > 0.0 {
            scores.depression += 0.1;
        }
        if answers.sleep == Some(SleepPattern::Less) && scores.anxiety > 0.0 {
            scores.anxiety += 0.1;
        }

        let boost = duration_boost(answers.duration_days) + impairment_boost(answers.function_impairment);
        for score in [&mut scores.depression, &mut scores.anxiety, &mut scores.sleep] {
            if *score > 0.0 {
                *score += boost;
            }
        }
        scores
    }

    fn apply_text(&mut self, text: &str, analysis: Option<&AnalysisResult>) {
        let Some(analysis) = analysis else { return };
        if analysis.crisis {
            self.self_harm = 1.0;
            return;
        }
        match category_for_label(&analysis.label) {
            Some(LabelCategory::Suicidal) => self.self_harm = 1.0,
            Some(LabelCategory::Depression) => self.depression += 0.2 * clamp_unit(analysis.confidence),
            Some(LabelCategory::Anxiety | LabelCategory::Stress) => {
                self.anxiety += 0.2 * clamp_unit(analysis.confidence)
            }
            None => match fallback::classify_topic(text) {
                FallbackTopic::Sleep => self.sleep += 0.1,
                FallbackTopic::Anxiety => self.anxiety += 0.1,
                FallbackTopic::LowMood => self.depression += 0.1,
                FallbackTopic::General => {}
            },
        }
    }

    fn named(&self) -> [(&'static str, f64); 4] {
        [
            (SELF_HARM, clamp_unit(self.self_harm)),
            (DEPRESSION, clamp_unit(self.depression)),
            (ANXIETY, clamp_unit(self.anxiety)),
            (SLEEP_DISTURBANCE, clamp_unit(self.sleep)),
        ]
    }
}

fn duration_boost(days: Option<u32>) -> f64 {
    match days {
        Some(d) if d >= 90 => 0.15,
        Some(d) if d >= 30 => 0.10,
        Some(d) if d >= 14 => 0.05,
        _ => 0.0,
    }
}

fn impairment_boost(level: Option<u32>) -> f64 {
    let level = level.unwrap_or(0).min(MAX_IMPAIRMENT);
    level as f64 / MAX_IMPAIRMENT as f64 * 0.15
}

// ── Assessment ────────────────────────────────────────────────────────────────

/// Everything the questionnaire contributes to a `SelfCheckReport`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub conditions: Vec<ConditionScore>,
    pub threat_level: ThreatLevel,
    pub recommended: Vec<String>,
    pub advice: Vec<String>,
    pub doctors: Vec<Doctor>,
}

pub fn assess(
    answers: &SelfCheckAnswers,
    text: &str,
    analysis: Option<&AnalysisResult>,
    directory: &[Doctor],
) -> Assessment {
    let mut raw = RawScores::from_answers(answers);
    raw.apply_text(text, analysis);
    let named = raw.named();

    let threat_level = threat_level(&raw, &named);

    let mut conditions: Vec<ConditionScore> = named
        .iter()
        .filter(|(_, score)| *score >= REPORT_THRESHOLD)
        .map(|(name, score)| ConditionScore { name: name.to_string(), score: normalise_confidence(*score) })
        .collect();
    conditions.sort_by(|a, b| b.score.total_cmp(&a.score));

    let specialists = recommend(threat_level, &conditions);
    let advice = advise(threat_level, &conditions);
    let doctors = match_doctors(&specialists, directory);

    Assessment {
        conditions,
        threat_level,
        recommended: specialists.iter().map(|s| s.title().to_string()).collect(),
        advice,
        doctors,
    }
}

fn threat_level(raw: &RawScores, named: &[(&'static str, f64)]) -> ThreatLevel {
    let highest = named.iter().map(|(_, s)| *s).fold(0.0_f64, f64::max);
    if raw.self_harm >= 1.0 {
        ThreatLevel::Emergency
    } else if raw.self_harm >= SELF_HARM_HIGH || highest >= HIGH_THRESHOLD {
        ThreatLevel::High
    } else if highest >= MODERATE_THRESHOLD {
        ThreatLevel::Moderate
    } else {
        ThreatLevel::Low
    }
}

fn recommend(level: ThreatLevel, conditions: &[ConditionScore]) -> Vec<Specialist> {
    let mut out: Vec<Specialist> = Vec::new();
    let mut push = |s: Specialist| {
        if !out.contains(&s) {
            out.push(s);
        }
    };

    if level == ThreatLevel::Emergency {
        push(Specialist::EmergencyServices);
    }
    for condition in conditions {
        match condition.name.as_str() {
            SELF_HARM => push(Specialist::Psychiatrist),
            DEPRESSION => {
                push(Specialist::Psychiatrist);
                push(Specialist::ClinicalPsychologist);
            }
            ANXIETY => push(Specialist::ClinicalPsychologist),
            SLEEP_DISTURBANCE => push(Specialist::SleepSpecialist),
            _ => {}
        }
    }
    if out.is_empty() {
        out.push(Specialist::Counsellor);
    }
    out
}

fn advise(level: ThreatLevel, conditions: &[ConditionScore]) -> Vec<String> {
    let mut advice = Vec::new();
    if level == ThreatLevel::Emergency {
        advice.push("If you are in immediate danger, call emergency services or a helpline now.".to_string());
    }
    for condition in conditions {
        let line = match condition.name.as_str() {
            SELF_HARM => "You don't have to carry this alone. Tell someone you trust how you are feeling today.",
            DEPRESSION => fallback::LOW_MOOD_TIP,
            ANXIETY => fallback::ANXIETY_TIP,
            SLEEP_DISTURBANCE => fallback::SLEEP_TIP,
            _ => continue,
        };
        advice.push(line.to_string());
    }
    if conditions.is_empty() {
        advice.push("Keep up the routines that help you feel well, and check in again if things change.".to_string());
    }
    advice
}

/// Directory entries matching any recommended specialist, in directory
/// order. The whole directory when nothing matches.
fn match_doctors(specialists: &[Specialist], directory: &[Doctor]) -> Vec<Doctor> {
    let matched: Vec<Doctor> = directory
        .iter()
        .filter(|d| specialists.iter().any(|s| s.matches(d)))
        .cloned()
        .collect();
    if matched.is_empty() {
        directory.to_vec()
    } else {
        matched
    }
}
