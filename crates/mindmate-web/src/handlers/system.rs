//! Liveness probe.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

/// GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({
        "ok": true,
        "ts": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
