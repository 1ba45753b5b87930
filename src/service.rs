//! BreakdownService - the public entry point for breakdown acquisition
//!
//! Wraps the failover client with input validation and the deterministic
//! fallback breakdown. For valid input this never fails: total backend
//! unavailability degrades to static fallback content instead of failing
//! the user-visible operation.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::LlmConfig;
use crate::domain::{BreakdownResult, Importance};
use crate::llm::{ChatClient, FailoverClient};

/// Steps substituted when every candidate model fails
const FALLBACK_STEPS: [&str; 5] = [
    "Break the task into smaller parts",
    "Gather needed materials or resources",
    "Start with the easiest part first",
    "Take breaks when needed",
    "Review and finish up",
];

const FALLBACK_MOTIVATION: &str = "Even without any help from the models, you can do this one step at a time.";

/// Errors from breakdown generation
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Generates task breakdowns, falling back to fixed steps when every
/// candidate model fails
pub struct BreakdownService {
    failover: FailoverClient,
    candidates: Vec<String>,
}

impl BreakdownService {
    /// Create a service over a chat backend using the configured model list
    pub fn new(backend: Arc<dyn ChatClient>, config: &LlmConfig) -> Self {
        Self {
            failover: FailoverClient::new(backend, config.temperature, config.max_tokens),
            candidates: config.candidate_models(),
        }
    }

    /// Generate a breakdown for a task title
    ///
    /// Rejects blank titles before any remote call. Otherwise always
    /// returns a result with a non-empty step list: exhaustion of the
    /// candidate models is absorbed here and replaced by the fallback.
    pub async fn generate(&self, title: &str, importance: Importance) -> Result<BreakdownResult, ServiceError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ServiceError::InvalidInput("task title must not be empty".to_string()));
        }

        debug!(%title, %importance, "generate: called");

        match self.failover.request_breakdown(title, importance, &self.candidates).await {
            Ok(result) => {
                info!(%title, step_count = result.steps.len(), "generate: model breakdown");
                Ok(result)
            }
            Err(e) => {
                if let Some(failures) = e.failures() {
                    for failure in failures {
                        debug!(model = %failure.model, reason = %failure.reason, "generate: candidate failure");
                    }
                }
                warn!(%title, error = %e, "generate: all models failed, using fallback breakdown");
                Ok(Self::fallback(importance))
            }
        }
    }

    /// The deterministic fallback breakdown
    pub fn fallback(importance: Importance) -> BreakdownResult {
        BreakdownResult::from_steps(
            FALLBACK_STEPS.iter().map(|s| s.to_string()).collect(),
            FALLBACK_MOTIVATION.to_string(),
            importance,
        )
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::llm::{ChatRequest, LlmError};

    /// Backend that always fails the same way
    struct DeadBackend;

    #[async_trait]
    impl ChatClient for DeadBackend {
        async fn chat(&self, _model: &str, _request: &ChatRequest) -> Result<String, LlmError> {
            Err(LlmError::ApiError {
                status: 503,
                message: "backend down".to_string(),
            })
        }
    }

    /// Backend that always answers with fixed JSON
    struct FixedBackend(&'static str);

    #[async_trait]
    impl ChatClient for FixedBackend {
        async fn chat(&self, _model: &str, _request: &ChatRequest) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    fn service(backend: Arc<dyn ChatClient>) -> BreakdownService {
        BreakdownService::new(backend, &LlmConfig::default())
    }

    #[tokio::test]
    async fn test_blank_title_rejected_before_any_call() {
        let svc = service(Arc::new(DeadBackend));

        assert!(matches!(
            svc.generate("", Importance::Medium).await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            svc.generate("   \t", Importance::Medium).await,
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_total_backend_failure_yields_fallback() {
        let svc = service(Arc::new(DeadBackend));

        let result = svc.generate("clean the garage", Importance::High).await.unwrap();

        assert_eq!(result.steps.len(), FALLBACK_STEPS.len());
        assert_eq!(result.steps[0], "Break the task into smaller parts");
        assert!(!result.motivation.is_empty());
        assert_eq!(result.priority, Importance::High);
    }

    #[tokio::test]
    async fn test_model_breakdown_passes_through() {
        let svc = service(Arc::new(FixedBackend(
            r#"{"steps":["open hood","check oil"],"motivation":"easy does it","priority":"low"}"#,
        )));

        let result = svc.generate("check car oil", Importance::Medium).await.unwrap();

        assert_eq!(result.steps, vec!["open hood", "check oil"]);
        assert_eq!(result.motivation, "easy does it");
        assert_eq!(result.priority, Importance::Low);
    }

    #[tokio::test]
    async fn test_generate_never_returns_empty_steps() {
        // Backend returns valid JSON with no steps for every candidate;
        // exhaustion must degrade to the fallback, not an empty result.
        let svc = service(Arc::new(FixedBackend(r#"{"motivation":"no steps today"}"#)));

        let result = svc.generate("water plants", Importance::Low).await.unwrap();

        assert!(!result.is_empty());
        assert_eq!(result.steps.len(), FALLBACK_STEPS.len());
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let a = BreakdownService::fallback(Importance::Medium);
        let b = BreakdownService::fallback(Importance::Medium);
        assert_eq!(a.steps, b.steps);
        assert_eq!(a.motivation, b.motivation);
    }
}
