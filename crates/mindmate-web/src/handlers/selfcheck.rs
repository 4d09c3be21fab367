//! Guided self-check.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use mindmate_common::SelfCheckReport;
use mindmate_triage::selfcheck::{SelfCheckAnswers, SelfCheckRequest};
use serde_json::Value;
use tracing::warn;

use super::{lenient_body, text_field};
use crate::state::SharedState;

/// POST /api/selfcheck - body `{answers, text}`.
/// Unreadable answers count as no answers.
pub async fn selfcheck(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SelfCheckReport>, JsonRejection> {
    let body = lenient_body(payload)?;

    let answers = match body.get("answers") {
        None | Some(Value::Null) => SelfCheckAnswers::default(),
        Some(raw) => serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
            warn!(error = %e, "Unreadable self-check answers, scoring without them");
            SelfCheckAnswers::default()
        }),
    };
    let request = SelfCheckRequest { answers, text: text_field(&body, "text") };

    Ok(Json(state.triage.selfcheck(&request).await))
}
