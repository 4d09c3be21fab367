//! Remote text classifier abstraction.
//!
//! Implementations return an explicit `Result`; the pipeline branches on it
//! and degrades to the heuristic path on `Err`. Nothing here panics or
//! propagates past the pipeline.

pub mod gateway;
pub mod payload;

use async_trait::async_trait;
use mindmate_common::ClassifierScore;
use thiserror::Error;

pub use gateway::HfInferenceGateway;
pub use payload::ClassifierPayload;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("classifier request timed out")]
    Timeout,
    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },
    #[error("classifier reported an error: {0}")]
    Remote(String),
    #[error("malformed classifier payload: {0}")]
    MalformedPayload(String),
}

impl GatewayError {
    /// Classify a transport error, separating timeouts from other failures.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Http(err)
        }
    }
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Score `text` against every label the model knows.
    /// An empty `Ok` list is a valid answer meaning "no opinion".
    async fn classify(&self, text: &str) -> Result<Vec<ClassifierScore>, GatewayError>;

    fn model_id(&self) -> &str;
}
