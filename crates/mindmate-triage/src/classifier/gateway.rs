//! Hugging Face inference router client.
//!
//! One POST per request, bearer-token auth, all label scores requested,
//! model warm-up awaited and the remote cache bypassed. No retries.

use std::time::Duration;

use async_trait::async_trait;
use mindmate_common::ClassifierScore;
use mindmate_config::ClassifierConfig;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::{payload, GatewayError, TextClassifier};

/// Longest slice of an error body kept in `GatewayError::Api`.
const ERROR_BODY_PREVIEW: usize = 200;

pub struct HfInferenceGateway {
    pub endpoint: String,
    pub model: String,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl HfInferenceGateway {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<SecretString>,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            client: builder.build()?,
        })
    }

    pub fn from_config(cfg: &ClassifierConfig) -> Result<Self, GatewayError> {
        let api_key = cfg
            .api_key
            .as_ref()
            .map(|k| SecretString::from(k.expose_secret().to_string()));
        if api_key.is_none() {
            tracing::warn!(
                "No classifier API key configured (set HUGGINGFACE_API_KEY); \
                 requests will be sent unauthenticated and will likely fall back"
            );
        }
        Self::new(cfg.endpoint.clone(), cfg.model.clone(), api_key, cfg.timeout())
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "model": &self.model,
            "input": text,
            "parameters": { "return_all_scores": true },
            "options": { "wait_for_model": true, "use_cache": false },
        })
    }
}

#[async_trait]
impl TextClassifier for HfInferenceGateway {
    async fn classify(&self, text: &str) -> Result<Vec<ClassifierScore>, GatewayError> {
        let mut req = self.client.post(&self.endpoint).json(&self.request_body(text));
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key.expose_secret());
        }

        let resp = req.send().await.map_err(GatewayError::from_transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(GatewayError::from_transport)?;

        if !status.is_success() {
            let message: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
            return Err(GatewayError::Api { status: status.as_u16(), message });
        }

        let scores = payload::parse_scores(&body)?;
        debug!(model = %self.model, labels = scores.len(), "Classifier responded");
        Ok(scores)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
