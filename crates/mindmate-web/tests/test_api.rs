//! HTTP surface tests. The router is driven in-process; no socket is bound.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mindmate_test_utils::{sample_catalog, ScriptedClassifier};
use mindmate_web::{router::build_router, state::AppState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

const BODY_LIMIT: usize = 80 * 1024;

fn app_with(classifier: Arc<ScriptedClassifier>, body_limit: usize) -> Router {
    build_router(AppState::new(sample_catalog(), classifier), body_limit)
}

fn app() -> Router {
    app_with(ScriptedClassifier::unavailable(), BODY_LIMIT)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    send(app, request).await
}

// ── Reference data ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    let ts = body["ts"].as_str().unwrap();
    assert!(ts.ends_with('Z'), "not UTC ISO-8601: {ts}");
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
}

#[tokio::test]
async fn test_doctors_and_sleep_tips() {
    let (status, body) = get(app(), "/api/doctors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["doctors"].as_array().unwrap().len(), 4);
    assert_eq!(body["doctors"][0]["name"], "Tele-MANAS");

    let (status, body) = get(app(), "/api/sleep-tips").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tips"][0]["title"], "Wind down");
}

#[tokio::test]
async fn test_knowledge_search() {
    let (status, body) = get(app(), "/api/knowledge?q=panic").await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id"], 1);
    assert_eq!(results[0]["q"], "What is a panic attack?");
    assert!(results[0]["a"].is_string());

    let (_, body) = get(app(), "/api/knowledge").await;
    assert_eq!(body, json!({"results": []}));
}

// ── Analyze ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_analyze_empty_and_malformed() {
    let (status, body) = post_json(app(), "/api/analyze", json!({"text": ""})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "empty");
    assert!(!body["reply"].as_str().unwrap().is_empty());

    let (status, body) = post_json(app(), "/api/analyze", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "empty");

    let (status, body) = post_raw(app(), "/api/analyze", "{not json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "empty");
}

#[tokio::test]
async fn test_analyze_crisis() {
    let (status, body) = post_json(app(), "/api/analyze", json!({"text": "I want to KILL MYSELF now"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["crisis"], true);
    assert_eq!(body["label"], "suicidal");
    assert_eq!(body["confidence"], 1.0);
    assert_eq!(body["knowledgeResults"], json!([]));
    assert!(body.get("fallback").is_none());
}

#[tokio::test]
async fn test_analyze_classifier_down_uses_heuristic() {
    let (status, body) = post_json(app(), "/api/analyze", json!({"text": "I can't sleep"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "label": "neutral",
            "confidence": 0.5,
            "reply": "Try 4-4-4 breathing, low lights, and no screens 1 hour before sleep.",
            "crisis": false,
            "knowledgeResults": []
        })
    );
}

#[tokio::test]
async fn test_analyze_with_classifier_scores() {
    let classifier = ScriptedClassifier::scores(vec![("stress", 0.6666), ("anxiety", 0.2)]);
    let app = app_with(classifier.clone(), BODY_LIMIT);

    let (_, body) = post_json(app, "/api/analyze", json!({"text": "Everything worries me"})).await;
    assert_eq!(body["label"], "stress");
    assert_eq!(body["confidence"], 0.67);
    assert_eq!(body["reply"], "Seems like stress. Drink water, stretch 3 min, breathe slowly.");
    assert_eq!(classifier.calls(), 1);
}

#[tokio::test]
async fn test_analyze_numeric_text_is_stringified() {
    let (status, body) = post_json(app(), "/api/analyze", json!({"text": 12345})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "neutral");
    assert_eq!(body["reply"], "I'm listening. Tell me a bit more.");
}

// ── GenAI ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_genai() {
    let classifier = ScriptedClassifier::scores(vec![("anxiety", 0.9)]);
    let app = app_with(classifier.clone(), BODY_LIMIT);

    let (_, body) = post_json(app.clone(), "/api/genai", json!({"prompt": "I want to die"})).await;
    assert_eq!(body["crisis"], true);
    assert!(body.get("knowledgeResults").is_none());

    let (_, body) = post_json(app.clone(), "/api/genai", json!({"prompt": "panic"})).await;
    assert_eq!(body["knowledgeResults"].as_array().unwrap().len(), 2);
    assert!(body.get("crisis").is_none());

    let (_, body) = post_json(app, "/api/genai", json!({"prompt": "feeling hopeless"})).await;
    assert_eq!(
        body,
        json!({
            "reply": "Small steps help: sunlight, movement, journaling, and talking to someone you trust.",
            "knowledgeResults": []
        })
    );
    assert_eq!(classifier.calls(), 0);
}

// ── Self-check ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_selfcheck_emergency() {
    let body = json!({
        "answers": {"mood": "depressed", "sleep": "less", "anxiety": "high", "suicidal": "yes",
                    "duration_days": 90, "function_impairment": 5},
        "text": ""
    });
    let (status, body) = post_json(app(), "/api/selfcheck", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["threatLevel"], "Emergency");
    assert_eq!(body["crisis"], true);
    assert_eq!(body["recommended"][0], "Emergency Services");
    assert!(body["advice"].as_array().unwrap().len() >= 2);
    assert!(!body["doctors"].as_array().unwrap().is_empty());
    for c in body["conditions"].as_array().unwrap() {
        let score = c["score"].as_f64().unwrap();
        assert!((0.3..=1.0).contains(&score));
    }
}

#[tokio::test]
async fn test_selfcheck_garbage_answers_still_answer() {
    let (status, body) = post_json(app(), "/api/selfcheck", json!({"answers": "nope", "text": 7})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["threatLevel"], "Low");
    assert_eq!(body["recommended"], json!(["Counsellor"]));
}

// ── Middleware ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_security_and_cors_headers() {
    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["referrer-policy"], "no-referrer");
    assert_eq!(headers["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = app_with(ScriptedClassifier::unavailable(), 64);
    let text = "a".repeat(256);
    let (status, _) = post_json(app, "/api/analyze", json!({ "text": text })).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = get(app(), "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
