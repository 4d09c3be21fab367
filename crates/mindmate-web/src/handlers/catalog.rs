//! Static reference directories, served verbatim.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::SharedState;

/// GET /api/doctors
pub async fn doctors(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "doctors": state.catalog.doctors.as_slice() }))
}

/// GET /api/sleep-tips
pub async fn sleep_tips(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({ "tips": state.catalog.sleep_tips.as_slice() }))
}
