//! Background transcription worker
//!
//! Runs one task end to end: upload, wait until the remote file is ready,
//! generate, render, record the outcome, delete the staged file.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::Instrument;

use crate::domain::polling::PollPolicy;
use crate::domain::task::{TaskId, TaskUpdate};
use crate::domain::transcription::{AudioFile, TranscriptionPrompt};

use super::ports::{
    FileHandle, MarkupRenderer, RemoteFileState, TaskStore, TaskStoreError, Transcriber,
    TranscriptionError, UploadStaging,
};

/// Errors from a single worker run. Never escapes the worker: every variant
/// ends up as the task's failure message.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    #[error("Audio processing failed on the transcription service ({0})")]
    RemoteProcessingFailed(String),

    #[error("Timed out waiting for the transcription service after {0} status checks")]
    PollTimeout(u32),

    #[error("Task tracking failed: {0}")]
    Store(#[from] TaskStoreError),
}

/// Drives the transcription service for one task at a time
pub struct TranscriptionWorker {
    store: Arc<dyn TaskStore>,
    staging: Arc<dyn UploadStaging>,
    renderer: Arc<dyn MarkupRenderer>,
    poll_policy: PollPolicy,
    prompt: TranscriptionPrompt,
}

impl TranscriptionWorker {
    pub fn new(
        store: Arc<dyn TaskStore>,
        staging: Arc<dyn UploadStaging>,
        renderer: Arc<dyn MarkupRenderer>,
        poll_policy: PollPolicy,
    ) -> Self {
        Self {
            store,
            staging,
            renderer,
            poll_policy,
            prompt: TranscriptionPrompt::verbatim(),
        }
    }

    /// Replace the instruction sent with the audio
    pub fn with_prompt(mut self, prompt: TranscriptionPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poll_policy
    }

    /// Execute the task. Failures are recorded on the task, and the staged
    /// file is removed whatever the outcome.
    pub async fn run(&self, task_id: TaskId, audio: AudioFile, transcriber: Arc<dyn Transcriber>) {
        let span = tracing::info_span!(
            "transcription_job",
            task_id = %task_id,
            filename = %audio.display_name(),
        );

        async {
            match self.process(task_id, &audio, transcriber.as_ref()).await {
                Ok(()) => tracing::info!("Transcription completed"),
                Err(e) => {
                    let message = e.to_string();
                    tracing::warn!(error = %message, "Transcription failed");
                    if let Err(store_err) = self
                        .store
                        .set_status(task_id, TaskUpdate::Failed { error: message })
                        .await
                    {
                        tracing::error!(error = %store_err, "Failed to record task failure");
                    }
                }
            }

            self.cleanup(audio.path()).await;
        }
        .instrument(span)
        .await
    }

    async fn process(
        &self,
        task_id: TaskId,
        audio: &AudioFile,
        transcriber: &dyn Transcriber,
    ) -> Result<(), WorkerError> {
        self.store
            .set_status(task_id, TaskUpdate::Processing)
            .await?;

        tracing::debug!(mime_type = %audio.mime_type(), "Uploading audio");
        let handle = transcriber.upload(audio).await?;
        tracing::debug!(remote_file = %handle.name, "Upload complete");

        self.wait_until_ready(transcriber, &handle).await?;

        tracing::debug!("Generating transcript");
        let markup = transcriber.generate(&handle, &self.prompt).await?;
        let transcript = self.renderer.render(&markup);

        self.store
            .set_status(task_id, TaskUpdate::Completed { transcript })
            .await?;
        Ok(())
    }

    async fn wait_until_ready(
        &self,
        transcriber: &dyn Transcriber,
        handle: &FileHandle,
    ) -> Result<(), WorkerError> {
        let mut pending_checks: u32 = 0;
        loop {
            match transcriber.file_state(handle).await? {
                RemoteFileState::Ready => return Ok(()),
                RemoteFileState::Failed => {
                    return Err(WorkerError::RemoteProcessingFailed(handle.name.clone()))
                }
                RemoteFileState::Pending => {
                    pending_checks = pending_checks.saturating_add(1);
                    if self.poll_policy.is_exhausted(pending_checks) {
                        return Err(WorkerError::PollTimeout(pending_checks));
                    }
                    let delay = self.poll_policy.delay_for(pending_checks);
                    tracing::debug!(
                        remote_file = %handle.name,
                        attempt = pending_checks,
                        delay_ms = delay.as_millis() as u64,
                        "Remote file still processing"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn cleanup(&self, path: &Path) {
        if let Err(e) = self.staging.remove(path).await {
            tracing::warn!(error = %e, path = %path.display(), "Failed to delete staged upload");
        }
    }
}
