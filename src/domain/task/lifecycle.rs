//! Transcription task entity and its state machine

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::TaskId;

/// Task states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Queued,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Completed and failed tasks never change again
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid task transition: cannot {action} while task is {current_status}")]
pub struct InvalidTaskTransition {
    pub current_status: TaskStatus,
    pub action: String,
}

/// Requested change to a task's status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskUpdate {
    Processing,
    Completed { transcript: String },
    Failed { error: String },
}

/// A submitted transcription job.
///
/// State machine:
///   QUEUED -> PROCESSING (start_processing)
///   PROCESSING -> COMPLETED (complete)
///   QUEUED | PROCESSING -> FAILED (fail)
///
/// `result` and `error` stay empty until the task is terminal, and only one
/// of them is ever set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    result: Option<String>,
    error: Option<String>,
}

impl Task {
    /// Create a new queued task
    pub fn new(id: TaskId) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: TaskStatus::Queued,
            created_at: now,
            updated_at: now,
            result: None,
            error: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Rendered transcript, present once completed
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Failure message, present once failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Transition from QUEUED to PROCESSING
    pub fn start_processing(&mut self) -> Result<(), InvalidTaskTransition> {
        if self.status != TaskStatus::Queued {
            return Err(self.rejected("start processing"));
        }
        self.transition(TaskStatus::Processing);
        Ok(())
    }

    /// Transition from PROCESSING to COMPLETED, attaching the transcript
    pub fn complete(&mut self, transcript: String) -> Result<(), InvalidTaskTransition> {
        if self.status != TaskStatus::Processing {
            return Err(self.rejected("complete"));
        }
        self.result = Some(transcript);
        self.transition(TaskStatus::Completed);
        Ok(())
    }

    /// Transition from any non-terminal state to FAILED
    pub fn fail(&mut self, error: String) -> Result<(), InvalidTaskTransition> {
        if self.status.is_terminal() {
            return Err(self.rejected("fail"));
        }
        self.error = Some(error);
        self.transition(TaskStatus::Failed);
        Ok(())
    }

    /// Apply a status update
    pub fn apply(&mut self, update: TaskUpdate) -> Result<(), InvalidTaskTransition> {
        match update {
            TaskUpdate::Processing => self.start_processing(),
            TaskUpdate::Completed { transcript } => self.complete(transcript),
            TaskUpdate::Failed { error } => self.fail(error),
        }
    }

    fn transition(&mut self, status: TaskStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    fn rejected(&self, action: &str) -> InvalidTaskTransition {
        InvalidTaskTransition {
            current_status: self.status,
            action: action.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queued() -> Task {
        Task::new(TaskId::new())
    }

    #[test]
    fn new_task_is_queued_and_empty() {
        let task = queued();
        assert_eq!(task.status(), TaskStatus::Queued);
        assert!(task.result().is_none());
        assert!(task.error().is_none());
        assert_eq!(task.created_at(), task.updated_at());
    }

    #[test]
    fn happy_path_attaches_result_only() {
        let mut task = queued();
        task.start_processing().unwrap();
        assert_eq!(task.status(), TaskStatus::Processing);
        assert!(task.result().is_none());

        task.complete("<p>Speaker 1: hi</p>".to_string()).unwrap();
        assert_eq!(task.status(), TaskStatus::Completed);
        assert_eq!(task.result(), Some("<p>Speaker 1: hi</p>"));
        assert!(task.error().is_none());
    }

    #[test]
    fn failure_attaches_error_only() {
        let mut task = queued();
        task.start_processing().unwrap();
        task.fail("upload failed".to_string()).unwrap();
        assert_eq!(task.status(), TaskStatus::Failed);
        assert_eq!(task.error(), Some("upload failed"));
        assert!(task.result().is_none());
    }

    #[test]
    fn queued_task_can_fail_directly() {
        let mut task = queued();
        assert!(task.fail("boom".to_string()).is_ok());
        assert!(task.is_terminal());
    }

    #[test]
    fn queued_task_cannot_complete() {
        let mut task = queued();
        let err = task.complete("text".to_string()).unwrap_err();
        assert_eq!(err.current_status, TaskStatus::Queued);
    }

    #[test]
    fn terminal_states_are_final() {
        let mut task = queued();
        task.start_processing().unwrap();
        task.complete("done".to_string()).unwrap();

        assert!(task.start_processing().is_err());
        assert!(task.fail("late".to_string()).is_err());
        assert!(task.complete("again".to_string()).is_err());
        assert_eq!(task.result(), Some("done"));
        assert!(task.error().is_none());
    }

    #[test]
    fn processing_cannot_restart() {
        let mut task = queued();
        task.start_processing().unwrap();
        let err = task.apply(TaskUpdate::Processing).unwrap_err();
        assert!(err.to_string().contains("processing"));
    }

    #[test]
    fn status_strings_are_lowercase() {
        assert_eq!(TaskStatus::Queued.as_str(), "queued");
        assert_eq!(TaskStatus::Processing.to_string(), "processing");
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            "\"completed\""
        );
    }
}
