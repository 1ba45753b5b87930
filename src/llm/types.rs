//! Chat request/response types and the backend trait
//!
//! These model the OpenAI-style chat-completions wire format used by
//! OpenRouter, kept provider-agnostic behind the [`ChatClient`] trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::LlmError;

/// A chat completion request - everything needed for one attempt
/// against one model
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Conversation messages (system prompt first)
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature
    pub temperature: f32,

    /// Max tokens for the response
    pub max_tokens: u32,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One chat-completion backend
///
/// Implementations issue exactly one outbound call per `chat` invocation and
/// return the raw model text; parsing is the caller's concern.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn chat(&self, model: &str, request: &ChatRequest) -> Result<String, LlmError>;
}
