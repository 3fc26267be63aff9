//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod markup;
pub mod spawner;
pub mod staging;
pub mod task_store;
pub mod transcriber;

// Re-export common types
pub use config::ConfigStore;
pub use markup::MarkupRenderer;
pub use spawner::{Job, JobSpawner};
pub use staging::{StagingError, UploadStaging};
pub use task_store::{TaskStore, TaskStoreError};
pub use transcriber::{
    FileHandle, RemoteFileState, Transcriber, TranscriberFactory, TranscriberUnavailable,
    TranscriptionError,
};
