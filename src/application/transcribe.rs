//! Transcription use case: submit an upload, look up its task

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;

use crate::domain::task::{Task, TaskId};
use crate::domain::transcription::{AudioFile, AudioMimeType};

use super::ports::{
    JobSpawner, StagingError, TaskStore, TaskStoreError, TranscriberFactory,
    TranscriberUnavailable, UploadStaging,
};
use super::worker::TranscriptionWorker;

/// Errors from submitting an upload
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Unavailable(#[from] TranscriberUnavailable),

    #[error(transparent)]
    Staging(#[from] StagingError),

    #[error("Failed to create task: {0}")]
    Store(#[from] TaskStoreError),
}

/// An audio file received from a client
#[derive(Debug, Clone)]
pub struct AudioSubmission {
    pub file_name: String,
    /// Content type declared by the client, if any
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Accepts uploads, hands them to background workers and reports task state
pub struct TranscriptionService {
    store: Arc<dyn TaskStore>,
    staging: Arc<dyn UploadStaging>,
    spawner: Arc<dyn JobSpawner>,
    transcribers: Arc<dyn TranscriberFactory>,
    worker: Arc<TranscriptionWorker>,
}

impl TranscriptionService {
    /// Create a new service. The worker must share `store` and `staging`.
    pub fn new(
        store: Arc<dyn TaskStore>,
        staging: Arc<dyn UploadStaging>,
        spawner: Arc<dyn JobSpawner>,
        transcribers: Arc<dyn TranscriberFactory>,
        worker: TranscriptionWorker,
    ) -> Self {
        Self {
            store,
            staging,
            spawner,
            transcribers,
            worker: Arc::new(worker),
        }
    }

    /// Stage the upload, create a queued task and start its worker.
    /// Returns as soon as the worker is handed off.
    pub async fn submit(&self, submission: AudioSubmission) -> Result<TaskId, SubmitError> {
        let transcriber = self.transcribers.create()?;

        let path = self
            .staging
            .save(&submission.file_name, &submission.data)
            .await?;

        let task_id = match self.store.create().await {
            Ok(id) => id,
            Err(e) => {
                if let Err(cleanup_err) = self.staging.remove(&path).await {
                    tracing::warn!(error = %cleanup_err, "Failed to delete orphaned upload");
                }
                return Err(e.into());
            }
        };

        let mime_type =
            AudioMimeType::resolve(&submission.file_name, submission.content_type.as_deref());
        let audio = AudioFile::new(path, submission.file_name, mime_type);

        tracing::info!(
            task_id = %task_id,
            filename = %audio.display_name(),
            mime_type = %audio.mime_type(),
            bytes = submission.data.len(),
            "Transcription task queued"
        );

        let worker = Arc::clone(&self.worker);
        self.spawner.spawn(Box::pin(async move {
            worker.run(task_id, audio, transcriber).await;
        }));

        Ok(task_id)
    }

    /// Current state of a task, if it is known
    pub async fn status(&self, task_id: TaskId) -> Result<Option<Task>, TaskStoreError> {
        self.store.get(task_id).await
    }
}
