//! Staged audio file value object

use std::fmt;
use std::path::{Path, PathBuf};

/// MIME type sent when neither the extension nor the upload reveals one
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Supported audio MIME types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioMimeType {
    Wav,
    Mp3,
    Aiff,
    Aac,
    Ogg,
    Flac,
    Webm,
    Mp4,
}

impl AudioMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mp3",
            Self::Aiff => "audio/aiff",
            Self::Aac => "audio/aac",
            Self::Ogg => "audio/ogg",
            Self::Flac => "audio/flac",
            Self::Webm => "audio/webm",
            Self::Mp4 => "audio/mp4",
        }
    }

    /// Look up a type by file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" | "wave" => Some(Self::Wav),
            "mp3" | "mpeg" => Some(Self::Mp3),
            "aif" | "aiff" => Some(Self::Aiff),
            "aac" => Some(Self::Aac),
            "ogg" | "oga" | "opus" => Some(Self::Ogg),
            "flac" => Some(Self::Flac),
            "webm" => Some(Self::Webm),
            "m4a" | "mp4" => Some(Self::Mp4),
            _ => None,
        }
    }

    /// Pick the MIME type for an upload: the file extension wins, then the
    /// content type declared by the client, then a generic binary type.
    pub fn resolve(file_name: &str, declared: Option<&str>) -> String {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .map(|mime| mime.as_str().to_string())
            .or_else(|| {
                declared
                    .map(str::trim)
                    .filter(|ct| !ct.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string())
    }
}

impl fmt::Display for AudioMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An uploaded audio file sitting in the staging directory, ready to be sent
/// to the transcription service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    path: PathBuf,
    display_name: String,
    mime_type: String,
}

impl AudioFile {
    pub fn new(
        path: impl Into<PathBuf>,
        display_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            display_name: display_name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Location on local disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name the client uploaded the file under
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}
