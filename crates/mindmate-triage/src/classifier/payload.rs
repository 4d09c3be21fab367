//! Normalisation of the classifier response body.
//!
//! The inference router answers in one of several shapes depending on the
//! model and the pipeline it runs behind:
//!   [[{label, score}, ...]]   batched, one inner list per input
//!   [{label, score}, ...]     flat
//!   {label, score}            single top label
//!   {error, ...}              model loading / quota / bad token
//! Each shape is a variant; `into_scores` turns any of them into one list
//! or a `GatewayError`. Any other object is malformed.

use mindmate_common::ClassifierScore;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::GatewayError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ClassifierPayload {
    Nested(Vec<Vec<ClassifierScore>>),
    Flat(Vec<ClassifierScore>),
    Single(ClassifierScore),
    Object(Map<String, Value>),
}

impl ClassifierPayload {
    pub fn parse(body: &str) -> Result<Self, GatewayError> {
        serde_json::from_str(body).map_err(|e| GatewayError::MalformedPayload(e.to_string()))
    }

    /// Canonical score list. Only the first input of a batch is used.
    pub fn into_scores(self) -> Result<Vec<ClassifierScore>, GatewayError> {
        match self {
            ClassifierPayload::Nested(batches) => Ok(batches.into_iter().next().unwrap_or_default()),
            ClassifierPayload::Flat(scores) => Ok(scores),
            ClassifierPayload::Single(score) => Ok(vec![score]),
            ClassifierPayload::Object(mut obj) => match obj.remove("error") {
                Some(Value::String(message)) => Err(GatewayError::Remote(message)),
                Some(other) => Err(GatewayError::Remote(other.to_string())),
                None => Err(GatewayError::MalformedPayload(
                    "object without label or error".to_string(),
                )),
            },
        }
    }
}

/// Parse and normalise a raw response body in one step.
pub fn parse_scores(body: &str) -> Result<Vec<ClassifierScore>, GatewayError> {
    ClassifierPayload::parse(body)?.into_scores()
}
