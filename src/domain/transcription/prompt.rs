//! Transcription prompt value object

/// Instruction sent alongside every uploaded file
const TRANSCRIPTION_INSTRUCTION: &str = "Please listen to this audio file and provide a verbatim transcription. \
Identify different speakers (Speaker 1, Speaker 2, etc.) and format it clearly. \
Do not summarize, I need the full text.";

/// Value object holding the instruction given to the model with the audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionPrompt {
    content: String,
}

impl TranscriptionPrompt {
    /// Build a prompt with custom content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Verbatim, speaker-labelled, unsummarized transcription
    pub fn verbatim() -> Self {
        Self::new(TRANSCRIPTION_INSTRUCTION)
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Default for TranscriptionPrompt {
    fn default() -> Self {
        Self::verbatim()
    }
}
