//! OpenRouter chat-completions client
//!
//! Implements the ChatClient trait against the OpenAI-compatible
//! `/chat/completions` endpoint. One outbound call per attempt; retry and
//! failover policy live a layer up in [`super::FailoverClient`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{ChatClient, ChatRequest, LlmError};
use crate::config::LlmConfig;

/// OpenRouter API client
#[derive(Debug)]
pub struct OpenRouterClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenRouterClient {
    /// Create a client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(base_url = %config.base_url, "from_config: called");
        let api_key = config.get_api_key().map_err(|e| LlmError::Config(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            http,
        })
    }

    /// Endpoint URL, tolerating a trailing slash on the configured base
    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Pull the raw model text out of a chat-completions response body
    ///
    /// Providers vary: content usually lives at `choices[0].message.content`,
    /// but some return `choices[0].text` or a top-level `output`.
    fn extract_content(body: &serde_json::Value) -> Option<String> {
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .or_else(|| body["choices"][0]["text"].as_str())
            .or_else(|| body["output"].as_str())?;

        if content.trim().is_empty() {
            None
        } else {
            Some(content.to_string())
        }
    }
}

#[async_trait]
impl ChatClient for OpenRouterClient {
    async fn chat(&self, model: &str, request: &ChatRequest) -> Result<String, LlmError> {
        let url = self.endpoint();
        debug!(%model, %url, "chat: called");

        let body = serde_json::json!({
            "model": model,
            "messages": request.messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(%model, status, "chat: non-success status");
            return Err(LlmError::ApiError { status, message });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        match Self::extract_content(&json) {
            Some(content) => {
                debug!(%model, content_len = content.len(), "chat: success");
                Ok(content)
            }
            None => {
                debug!(%model, "chat: response body had no content field");
                Err(LlmError::EmptyResponse)
            }
        }
    }
}
