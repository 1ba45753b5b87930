//! TaskStore - in-memory task collection and step state machine
//!
//! Single logical owner per store instance; mutation is synchronous and
//! unlocked. Notable transitions are broadcast as [`TaskEvent`]s for the
//! presentation layer: created, step-completed, and task-completed (the
//! latter exactly once per Active -> Completed transition).

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::domain::{BreakdownResult, Importance, Task};

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Signals emitted on notable state transitions
#[derive(Debug, Clone)]
pub enum TaskEvent {
    /// A task was created
    Created { task_id: String },

    /// A step completed but the task still has incomplete steps
    StepCompleted { task_id: String, step_id: String },

    /// The last incomplete step finished; fired once per transition
    TaskCompleted { task_id: String },
}

/// In-memory task store
pub struct TaskStore {
    tasks: HashMap<String, Task>,
    /// Creation order, so listing is stable
    order: Vec<String>,
    event_tx: broadcast::Sender<TaskEvent>,
}

impl TaskStore {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            tasks: HashMap::new(),
            order: Vec::new(),
            event_tx,
        }
    }

    /// Subscribe to task events
    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        self.event_tx.subscribe()
    }

    /// Create a task from a breakdown result
    ///
    /// All steps start incomplete. An empty breakdown is rejected: callers
    /// are expected to have substituted the fallback breakdown already, so
    /// this is a defensive check only.
    pub fn create(
        &mut self,
        title: &str,
        importance: Importance,
        breakdown: &BreakdownResult,
    ) -> Result<Task, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::InvalidInput("task title must not be empty".to_string()));
        }
        if breakdown.is_empty() {
            return Err(StoreError::InvalidInput(
                "breakdown must contain at least one step".to_string(),
            ));
        }

        let task = Task::new(title, importance, breakdown);
        info!(task_id = %task.id, step_count = task.steps.len(), "create: task created");

        self.order.push(task.id.clone());
        self.tasks.insert(task.id.clone(), task.clone());
        self.emit(TaskEvent::Created {
            task_id: task.id.clone(),
        });

        Ok(task)
    }

    /// Get a task by ID
    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// List tasks in creation order
    pub fn list(&self) -> Vec<&Task> {
        self.order.iter().filter_map(|id| self.tasks.get(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Mark a step completed
    ///
    /// Idempotent: completing an already-completed step is a silent no-op
    /// and emits nothing. The task-completed signal fires exactly once, on
    /// the call that flips the last incomplete step.
    pub fn complete_step(&mut self, task_id: &str, step_id: &str) -> Result<Task, StoreError> {
        debug!(%task_id, %step_id, "complete_step: called");
        let task = self
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| StoreError::NotFound(format!("task {}", task_id)))?;

        let step = task
            .steps
            .iter_mut()
            .find(|s| s.id == step_id)
            .ok_or_else(|| StoreError::NotFound(format!("step {} in task {}", step_id, task_id)))?;

        if step.completed {
            debug!(%task_id, %step_id, "complete_step: already completed, no-op");
            return Ok(task.clone());
        }

        step.completed = true;
        let updated = task.clone();

        if updated.completed() {
            info!(%task_id, "complete_step: all steps done, task completed");
            self.emit(TaskEvent::TaskCompleted {
                task_id: task_id.to_string(),
            });
        } else {
            debug!(%task_id, %step_id, done = updated.completed_count(), total = updated.steps.len(), "complete_step: step done");
            self.emit(TaskEvent::StepCompleted {
                task_id: task_id.to_string(),
                step_id: step_id.to_string(),
            });
        }

        Ok(updated)
    }

    /// Replace a task's title and entire step sequence atomically
    ///
    /// All new steps start incomplete, forcing the task back to Active
    /// regardless of prior state. This is the only way a Completed task
    /// becomes Active again.
    pub fn edit(&mut self, task_id: &str, new_title: &str, new_steps: &[String]) -> Result<Task, StoreError> {
        debug!(%task_id, step_count = new_steps.len(), "edit: called");
        if new_title.trim().is_empty() {
            return Err(StoreError::InvalidInput("task title must not be empty".to_string()));
        }
        if new_steps.is_empty() {
            return Err(StoreError::InvalidInput(
                "edit requires at least one step".to_string(),
            ));
        }
        if new_steps.iter().any(|s| s.trim().is_empty()) {
            return Err(StoreError::InvalidInput("step text must not be blank".to_string()));
        }

        let task = self
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| StoreError::NotFound(format!("task {}", task_id)))?;

        task.replace(new_title.trim(), new_steps);
        info!(%task_id, "edit: task replaced and reset to active");

        Ok(task.clone())
    }

    /// Delete a task
    ///
    /// Deleting a missing (or already-deleted) ID is an error, not a silent
    /// success; callers treat NotFound on delete as non-fatal.
    pub fn delete(&mut self, task_id: &str) -> Result<Task, StoreError> {
        debug!(%task_id, "delete: called");
        let task = self
            .tasks
            .remove(task_id)
            .ok_or_else(|| StoreError::NotFound(format!("task {}", task_id)))?;
        self.order.retain(|id| id != task_id);

        info!(%task_id, "delete: task removed");
        Ok(task)
    }

    fn emit(&self, event: TaskEvent) {
        // No receivers is fine; the presentation layer is optional
        let _ = self.event_tx.send(event);
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
