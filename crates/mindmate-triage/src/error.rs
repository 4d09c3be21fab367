use thiserror::Error;

/// Faults raised while merging signals into a reply.
/// Callers convert these into the degraded result; they never reach the client.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("classifier returned a non-finite score {score} for label {label:?}")]
    InvalidScore { label: String, score: f64 },
}
