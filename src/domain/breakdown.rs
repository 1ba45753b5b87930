//! Breakdown result value type

use serde::{Deserialize, Serialize};

use super::Importance;

/// The outcome of one breakdown generation: an ordered list of step texts
/// plus optional motivational text and a priority label.
///
/// Ephemeral - consumed immediately to seed a task's steps, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownResult {
    /// Ordered step texts (3-6 for a normal generation)
    pub steps: Vec<String>,

    /// Short encouragement from the model (may be empty)
    #[serde(default)]
    pub motivation: String,

    /// Priority label echoed back to the caller
    #[serde(default)]
    pub priority: Importance,
}

impl BreakdownResult {
    /// Build a result from plain step texts
    pub fn from_steps(steps: Vec<String>, motivation: String, priority: Importance) -> Self {
        Self {
            steps,
            motivation,
            priority,
        }
    }

    /// True when no steps were recovered
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_result_serde_defaults() {
        let json = r#"{"steps": ["a", "b"]}"#;
        let result: BreakdownResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.steps, vec!["a", "b"]);
        assert_eq!(result.motivation, "");
        assert_eq!(result.priority, Importance::Medium);
    }

    #[test]
    fn test_is_empty() {
        let result = BreakdownResult::from_steps(vec![], String::new(), Importance::Low);
        assert!(result.is_empty());

        let result = BreakdownResult::from_steps(vec!["one".to_string()], String::new(), Importance::Low);
        assert!(!result.is_empty());
    }
}
