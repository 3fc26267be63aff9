//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod ports;
pub mod transcribe;
pub mod worker;

// Re-export use cases
pub use transcribe::{AudioSubmission, SubmitError, TranscriptionService};
pub use worker::{TranscriptionWorker, WorkerError};
