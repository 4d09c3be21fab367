//! mindmate-triage: text triage and response synthesis.
//!
//! Components, leaves first:
//!   crisis       keyword scanner for imminent self-harm phrases
//!   knowledge    immutable Q/A store with two-tier retrieval
//!   fallback     ordered regex cascade producing canned replies
//!   classifier   best-effort gateway to a remote text classifier
//!   synthesizer  priority rules merging all signals into one result
//!   selfcheck    questionnaire scoring on top of the synthesizer
//!   pipeline     the per-request entry points used by the web layer

pub mod crisis;
pub mod knowledge;
pub mod fallback;
pub mod classifier;
pub mod synthesizer;
pub mod selfcheck;
pub mod pipeline;
pub mod store;
pub mod error;

pub use classifier::{GatewayError, HfInferenceGateway, TextClassifier};
pub use error::TriageError;
pub use knowledge::KnowledgeStore;
pub use pipeline::{AnalyzeOutcome, GenAiReply, Triage};
pub use store::Catalog;
