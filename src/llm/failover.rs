//! Model failover
//!
//! Walks an ordered candidate list, one attempt per model, and
//! short-circuits on the first usable breakdown. All attempt errors are
//! treated alike: at this layer a permission failure is indistinguishable
//! from a transient one, and moving to the next model is the remedy for
//! both. No attempt is retried against the same model.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{normalize, ChatClient, ChatMessage, ChatRequest, LlmError, ModelFailure};
use crate::domain::{BreakdownResult, Importance};

const SYSTEM_PROMPT: &str = "You are a gentle productivity coach who breaks tasks down into \
     small, actionable steps for people who appreciate simple instructions. \
     ALWAYS respond with ONLY a valid JSON object, no markdown, no code \
     blocks, no extra text.";

/// Issues breakdown requests with per-model failover
pub struct FailoverClient {
    backend: Arc<dyn ChatClient>,
    temperature: f32,
    max_tokens: u32,
}

impl FailoverClient {
    /// Create a failover client over a chat backend
    pub fn new(backend: Arc<dyn ChatClient>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            backend,
            temperature,
            max_tokens,
        }
    }

    /// Request a breakdown, trying each candidate model in order
    ///
    /// Issues at most one outbound call per candidate and returns on the
    /// first success. Fails with `AllModelsExhausted` (carrying every
    /// per-model failure) only after the whole list has been tried.
    pub async fn request_breakdown(
        &self,
        title: &str,
        importance: Importance,
        candidates: &[String],
    ) -> Result<BreakdownResult, LlmError> {
        debug!(%title, %importance, candidate_count = candidates.len(), "request_breakdown: called");
        let request = self.build_request(title, importance);

        let mut failures = Vec::new();

        for model in candidates {
            match self.attempt(model, &request, importance).await {
                Ok(result) => {
                    debug!(%model, step_count = result.steps.len(), "request_breakdown: success");
                    return Ok(result);
                }
                Err(e) => {
                    warn!(%model, error = %e, "request_breakdown: model failed, trying next");
                    failures.push(ModelFailure {
                        model: model.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Err(LlmError::AllModelsExhausted { failures })
    }

    /// One attempt against one model: call, normalize, reject empty
    async fn attempt(
        &self,
        model: &str,
        request: &ChatRequest,
        importance: Importance,
    ) -> Result<BreakdownResult, LlmError> {
        let raw = self.backend.chat(model, request).await?;
        let result = normalize(&raw, importance)?;

        // A parseable response with no steps is still a failed attempt
        if result.is_empty() {
            return Err(LlmError::MalformedResponse("response contained no steps".to_string()));
        }

        Ok(result)
    }

    /// Build the breakdown prompt for a task title and importance tier
    fn build_request(&self, title: &str, importance: Importance) -> ChatRequest {
        let user_prompt = format!(
            "Break down this {} priority task into 3-6 clear actionable steps \
             and return a JSON object like {{\"steps\": [\"step1\", \"step2\"], \
             \"motivation\": \"short encouragement\"}}: \"{}\"",
            importance, title
        );

        ChatRequest {
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user_prompt)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}
