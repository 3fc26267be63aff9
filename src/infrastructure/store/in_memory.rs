//! In-process task tracker

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{TaskStore, TaskStoreError};
use crate::domain::task::{RetentionPolicy, Task, TaskId, TaskUpdate};

/// Task tracker kept in process memory. Everything is lost on restart.
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
    retention: RetentionPolicy,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::with_retention(RetentionPolicy::default())
    }

    pub fn with_retention(retention: RetentionPolicy) -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            retention,
        }
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Number of tracked tasks
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create(&self) -> Result<TaskId, TaskStoreError> {
        let mut tasks = self.tasks.write().await;
        let mut id = TaskId::new();
        while tasks.contains_key(&id) {
            id = TaskId::new();
        }
        tasks.insert(id, Task::new(id));
        Ok(id)
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>, TaskStoreError> {
        match self.retention {
            RetentionPolicy::Retain => Ok(self.tasks.read().await.get(&id).cloned()),
            RetentionPolicy::EvictOnRead => {
                let mut tasks = self.tasks.write().await;
                let finished = tasks.get(&id).is_some_and(Task::is_terminal);
                if finished {
                    tracing::debug!(task_id = %id, "Evicting finished task after read");
                    Ok(tasks.remove(&id))
                } else {
                    Ok(tasks.get(&id).cloned())
                }
            }
        }
    }

    async fn set_status(&self, id: TaskId, update: TaskUpdate) -> Result<Task, TaskStoreError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id).ok_or(TaskStoreError::NotFound(id))?;
        task.apply(update)?;
        Ok(task.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::TaskStatus;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn create_inserts_queued_task() {
        let store = InMemoryTaskStore::new();
        let id = store.create().await.unwrap();

        let task = store.get(id).await.unwrap().unwrap();
        assert_eq!(task.id(), id);
        assert_eq!(task.status(), TaskStatus::Queued);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_unknown_is_none() {
        let store = InMemoryTaskStore::new();
        assert!(store.get(TaskId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_status_walks_the_lifecycle() {
        let store = InMemoryTaskStore::new();
        let id = store.create().await.unwrap();

        store.set_status(id, TaskUpdate::Processing).await.unwrap();
        let task = store
            .set_status(
                id,
                TaskUpdate::Completed {
                    transcript: "<p>hi</p>".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(task.status(), TaskStatus::Completed);
        assert_eq!(task.result(), Some("<p>hi</p>"));
    }

    #[tokio::test]
    async fn set_status_rejects_leaving_terminal_state() {
        let store = InMemoryTaskStore::new();
        let id = store.create().await.unwrap();
        store
            .set_status(
                id,
                TaskUpdate::Failed {
                    error: "boom".to_string(),
                },
            )
            .await
            .unwrap();

        let err = store
            .set_status(id, TaskUpdate::Processing)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskStoreError::InvalidTransition(_)));

        let task = store.get(id).await.unwrap().unwrap();
        assert_eq!(task.status(), TaskStatus::Failed);
    }

    #[tokio::test]
    async fn set_status_unknown_task() {
        let store = InMemoryTaskStore::new();
        let err = store
            .set_status(TaskId::new(), TaskUpdate::Processing)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskStoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn retain_returns_same_result_every_time() {
        let store = InMemoryTaskStore::with_retention(RetentionPolicy::Retain);
        let id = store.create().await.unwrap();
        store.set_status(id, TaskUpdate::Processing).await.unwrap();
        store
            .set_status(
                id,
                TaskUpdate::Completed {
                    transcript: "<p>same</p>".to_string(),
                },
            )
            .await
            .unwrap();

        let first = store.get(id).await.unwrap().unwrap();
        let second = store.get(id).await.unwrap().unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn evict_on_read_drops_finished_tasks_only() {
        let store = InMemoryTaskStore::with_retention(RetentionPolicy::EvictOnRead);
        let id = store.create().await.unwrap();

        // Non-terminal reads keep the task
        assert!(store.get(id).await.unwrap().is_some());
        assert!(store.get(id).await.unwrap().is_some());

        store
            .set_status(
                id,
                TaskUpdate::Failed {
                    error: "boom".to_string(),
                },
            )
            .await
            .unwrap();

        let task = store.get(id).await.unwrap().unwrap();
        assert_eq!(task.error(), Some("boom"));
        assert!(store.get(id).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn concurrent_creates_are_unique() {
        let store = Arc::new(InMemoryTaskStore::new());
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create().await.unwrap() })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids.len(), 32);
        assert_eq!(store.len().await, 32);
    }
}
