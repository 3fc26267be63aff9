//! Transcription port interface

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcription::{AudioFile, TranscriptionPrompt};

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty transcription response")]
    EmptyResponse,

    #[error("Failed to read audio file: {0}")]
    ReadFailed(String),

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Reference to a file held by the transcription service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// Resource name used to poll the file (e.g. `files/abc123`)
    pub name: String,
    /// URI used to reference the file in generation requests
    pub uri: String,
    pub mime_type: String,
}

/// Processing state of an uploaded file on the remote side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteFileState {
    Pending,
    Ready,
    Failed,
}

impl RemoteFileState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RemoteFileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Port for the remote transcription service: upload, poll, generate.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Upload a staged audio file and return the remote handle.
    async fn upload(&self, audio: &AudioFile) -> Result<FileHandle, TranscriptionError>;

    /// Check whether the remote file is ready to be used.
    async fn file_state(&self, handle: &FileHandle) -> Result<RemoteFileState, TranscriptionError>;

    /// Generate content for the uploaded file.
    ///
    /// # Returns
    /// The model's Markdown output
    async fn generate(
        &self,
        handle: &FileHandle,
        prompt: &TranscriptionPrompt,
    ) -> Result<String, TranscriptionError>;
}

/// Error when no transcriber can be built for a request
#[derive(Debug, Clone, Error)]
pub enum TranscriberUnavailable {
    #[error("Server configuration error: API Key missing")]
    MissingApiKey,
}

/// Builds a transcriber per request so the credential is resolved at request
/// time rather than at startup.
pub trait TranscriberFactory: Send + Sync {
    fn create(&self) -> Result<Arc<dyn Transcriber>, TranscriberUnavailable>;
}
