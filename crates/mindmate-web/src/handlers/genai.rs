use axum::{extract::rejection::JsonRejection, extract::State, Json};
use mindmate_triage::GenAiReply;
use serde_json::Value;

use super::{lenient_body, text_field};
use crate::state::SharedState;

/// POST /api/genai - body `{prompt}`. Never calls the remote classifier.
pub async fn genai(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenAiReply>, JsonRejection> {
    let body = lenient_body(payload)?;
    let prompt = text_field(&body, "prompt");
    Ok(Json(state.triage.genai(&prompt)))
}
