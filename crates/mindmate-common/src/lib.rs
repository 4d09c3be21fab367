//! mindmate-common: Shared types, errors, and helpers used across all MindMate crates.

pub mod error;
pub mod entities;
pub mod confidence;

// Re-export commonly used types
pub use entities::{
    AnalysisResult, ClassifierScore, ConditionScore, Doctor, KnowledgeEntry, RecordId,
    SelfCheckReport, SleepTip, ThreatLevel,
};
pub use error::{MindmateError, Result};
