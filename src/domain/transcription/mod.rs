//! Transcription domain module

mod audio_file;
mod prompt;

pub use audio_file::{AudioFile, AudioMimeType, FALLBACK_MIME_TYPE};
pub use prompt::TranscriptionPrompt;
