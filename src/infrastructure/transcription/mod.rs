//! Transcription service adapters

mod factory;
mod gemini;

pub use factory::{GeminiTranscriberFactory, API_KEY_ENV_VARS};
pub use gemini::{GeminiTranscriber, API_BASE_URL, API_KEY_HEADER};
