//! Free-text analysis.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use mindmate_triage::AnalyzeOutcome;
use serde_json::Value;

use super::{lenient_body, text_field};
use crate::state::SharedState;

/// POST /api/analyze - body `{text}`.
/// Always answers 200: an empty text gets the soft error object.
pub async fn analyze(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeOutcome>, JsonRejection> {
    let body = lenient_body(payload)?;
    let text = text_field(&body, "text");
    Ok(Json(state.triage.analyze(&text).await))
}
