//! Text-generation collaborator: OpenAI chat completions.
//!
//! One prompt in, one narrative out. No streaming, no multi-turn memory.
//! The narrative lives at `choices[0].message.content`; any deviation from
//! that shape is a typed [`PredictionError`].

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::PredictionError;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Seam for the text-generation service.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one completion: persona/system string plus user prompt.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, PredictionError>;
}

/// OpenAI chat-completions client.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, PredictionError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt },
            ],
        });

        let resp = self
            .client
            .post(COMPLETIONS_URL)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| PredictionError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            return Err(PredictionError::Request(format!(
                "{status}: {}",
                detail.chars().take(200).collect::<String>()
            )));
        }

        let payload: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| PredictionError::Shape(e.to_string()))?;

        extract_narrative(&payload)
    }
}

/// Pull the narrative string out of a chat-completions payload.
pub(crate) fn extract_narrative(payload: &serde_json::Value) -> Result<String, PredictionError> {
    payload
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            PredictionError::Shape("missing choices[0].message.content".to_string())
        })
}
