//! Upload staging port interface

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Failed to prepare upload directory: {0}")]
    CreateDir(#[source] std::io::Error),

    #[error("Failed to write uploaded file: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to remove uploaded file: {0}")]
    Remove(#[source] std::io::Error),
}

/// Port for the temporary storage of uploaded files
#[async_trait]
pub trait UploadStaging: Send + Sync {
    /// Write the bytes under a name unique to this upload and return its path.
    async fn save(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, StagingError>;

    /// Remove a staged file. Removing a file that is already gone succeeds.
    async fn remove(&self, path: &Path) -> Result<(), StagingError>;
}
