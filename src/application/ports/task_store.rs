//! Task tracker port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::task::{InvalidTaskTransition, Task, TaskId, TaskUpdate};

#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTaskTransition),
}

/// Port for the task tracker, shared by the HTTP layer and the workers.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Allocate a fresh id and record a queued task under it.
    async fn create(&self) -> Result<TaskId, TaskStoreError>;

    /// Look up a task. Depending on retention, reading a finished task may
    /// remove it.
    async fn get(&self, id: TaskId) -> Result<Option<Task>, TaskStoreError>;

    /// Move a task to a new status, attaching the transcript or error.
    async fn set_status(&self, id: TaskId, update: TaskUpdate) -> Result<Task, TaskStoreError>;
}
