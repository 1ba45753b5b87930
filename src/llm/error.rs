//! LLM error types

use thiserror::Error;

/// One candidate model's failure, kept for diagnostics on exhaustion
#[derive(Debug, Clone)]
pub struct ModelFailure {
    pub model: String,
    pub reason: String,
}

impl std::fmt::Display for ModelFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.model, self.reason)
    }
}

/// Errors from the breakdown acquisition pipeline
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("All {} candidate models failed", failures.len())]
    AllModelsExhausted { failures: Vec<ModelFailure> },
}

impl LlmError {
    /// True when every candidate model was tried and failed
    pub fn is_exhausted(&self) -> bool {
        matches!(self, LlmError::AllModelsExhausted { .. })
    }

    /// Per-model failure reasons, if this is an exhaustion error
    pub fn failures(&self) -> Option<&[ModelFailure]> {
        match self {
            LlmError::AllModelsExhausted { failures } => Some(failures),
            _ => None,
        }
    }
}
