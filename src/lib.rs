//! Orbit - LLM-assisted task breakdown with model failover
//!
//! A user describes a goal; Orbit asks an LLM backend for a short ordered
//! list of actionable sub-steps, failing over across candidate models and
//! degrading to a deterministic fallback when every model fails. The
//! resulting steps seed an in-memory task store that tracks completion and
//! broadcasts signals (created, step-completed, task-completed) for a
//! presentation layer.
//!
//! # Modules
//!
//! - [`llm`] - backend client, response normalization, model failover
//! - [`service`] - [`BreakdownService`], the never-failing public entry point
//! - [`store`] - [`TaskStore`] state machine and its event signals
//! - [`domain`] - tasks, steps, importance tiers, breakdown results
//! - [`config`] - configuration types and loading

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod service;
pub mod store;

pub use config::{Config, LlmConfig};
pub use domain::{BreakdownResult, Importance, Step, Task};
pub use llm::{ChatClient, ChatMessage, ChatRequest, FailoverClient, LlmError, ModelFailure, OpenRouterClient, Role};
pub use service::{BreakdownService, ServiceError};
pub use store::{StoreError, TaskEvent, TaskStore};
