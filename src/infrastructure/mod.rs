//! Infrastructure layer - Adapter implementations
//!
//! Concrete implementations of the port interfaces: the Gemini API client,
//! local file staging, the in-memory task store, the tokio spawner,
//! Markdown rendering, config files and logging.

pub mod config;
pub mod executor;
pub mod markup;
pub mod observability;
pub mod staging;
pub mod store;
pub mod transcription;

// Re-export adapters
pub use config::TomlConfigStore;
pub use executor::TokioJobSpawner;
pub use markup::MarkdownRenderer;
pub use staging::LocalUploadStaging;
pub use store::InMemoryTaskStore;
pub use transcription::{GeminiTranscriber, GeminiTranscriberFactory};
