use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::TriageConfig;
use crate::error::TriageError;

/// One outbound classification call, returning the raw response envelope.
///
/// Implementations never retry; scheduling belongs to
/// [`TriageClient`](super::client::TriageClient). Each invocation is
/// synchronous and self-contained, with no connection state shared across
/// calls.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_payload: &Value,
    ) -> Result<Value, TriageError>;

    fn model_name(&self) -> &str;
}

/// Chat-completions transport against the OpenAI API.
pub struct OpenAiProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(config: &TriageConfig) -> Result<Self, TriageError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TriageError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        user_payload: &Value,
    ) -> Result<Value, TriageError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_payload.to_string() },
            ],
            "response_format": { "type": "json_object" },
        });

        debug!(model = %self.model, "sending classification request");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TriageError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TriageError::Request(format!("API error ({status}): {detail}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TriageError::MalformedResponse(e.to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
