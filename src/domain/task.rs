//! Task and Step records
//!
//! A task owns an ordered sequence of steps. Completion is always derived
//! from the steps, never stored, so the flag cannot drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{generate_id, BreakdownResult, Importance};

/// One actionable sub-step of a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Unique within the owning task (`step-0`, `step-1`, ...)
    pub id: String,

    /// Step text as produced by the breakdown
    pub text: String,

    /// Monotonic within one step sequence: only a full edit resets it
    pub completed: bool,
}

impl Step {
    /// Build the ordered step sequence for a fresh breakdown
    pub fn sequence(texts: &[String]) -> Vec<Step> {
        texts
            .iter()
            .enumerate()
            .map(|(idx, text)| Step {
                id: format!("step-{}", idx),
                text: text.clone(),
                completed: false,
            })
            .collect()
    }
}

/// A user task with its breakdown steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique ID, assigned at creation, immutable
    pub id: String,

    /// Task title (non-empty)
    pub title: String,

    /// Importance tier (presentation concern, carried with the task)
    pub importance: Importance,

    /// Ordered steps; order is the presentation/orbit order
    pub steps: Vec<Step>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a task from a breakdown result, all steps incomplete
    pub fn new(title: impl Into<String>, importance: Importance, breakdown: &BreakdownResult) -> Self {
        let title = title.into();
        Self {
            id: generate_id("task", &title),
            steps: Step::sequence(&breakdown.steps),
            title,
            importance,
            created_at: Utc::now(),
        }
    }

    /// Derived completion: true iff every step is completed
    pub fn completed(&self) -> bool {
        self.steps.iter().all(|s| s.completed)
    }

    /// Count of completed steps
    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// Look up a step by ID
    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    /// Replace title and the whole step sequence, resetting completion
    pub fn replace(&mut self, new_title: impl Into<String>, new_steps: &[String]) {
        self.title = new_title.into();
        self.steps = Step::sequence(new_steps);
    }
}
