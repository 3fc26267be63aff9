//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod polling;
pub mod task;
pub mod transcription;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use polling::{Backoff, PollPolicy};
pub use task::{RetentionPolicy, Task, TaskId, TaskStatus, TaskUpdate};
pub use transcription::{AudioFile, AudioMimeType, TranscriptionPrompt};
