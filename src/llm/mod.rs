//! Breakdown acquisition pipeline
//!
//! An [`OpenRouterClient`] issues chat-completion requests, a
//! [`FailoverClient`] walks an ordered candidate model list until one
//! attempt produces a usable breakdown, and [`normalize`] turns raw model
//! text into a typed [`crate::domain::BreakdownResult`].

mod error;
mod failover;
mod normalize;
mod openrouter;
mod types;

pub use error::{LlmError, ModelFailure};
pub use failover::FailoverClient;
pub use normalize::normalize;
pub use openrouter::OpenRouterClient;
pub use types::{ChatClient, ChatMessage, ChatRequest, Role};
