//! Gemini API transcriber adapter
//!
//! Uses the Files API (resumable upload + status lookup) and
//! `generateContent` with a `fileData` reference to the uploaded audio.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{FileHandle, RemoteFileState, Transcriber, TranscriptionError};
use crate::domain::config::DEFAULT_MODEL;
use crate::domain::transcription::{AudioFile, TranscriptionPrompt};

/// Gemini API base URL
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Response header carrying the resumable upload session URL
const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

/// Request header carrying the API key. The key never goes into a URL.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

// Request types for Gemini API

#[derive(Debug, Serialize)]
struct StartUploadRequest {
    file: UploadMetadata,
}

#[derive(Debug, Serialize)]
struct UploadMetadata {
    display_name: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_data: Option<FileData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    mime_type: String,
    file_uri: String,
}

// Response types for Gemini API

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: GeminiFile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiFile {
    name: String,
    uri: String,
    mime_type: Option<String>,
    state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Gemini API transcriber
pub struct GeminiTranscriber {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiTranscriber {
    /// Create a new Gemini transcriber with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a new Gemini transcriber with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn upload_url(&self) -> String {
        format!("{}/upload/v1beta/files", self.base_url)
    }

    fn file_url(&self, name: &str) -> String {
        format!("{}/v1beta/{}", self.base_url, name)
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Build the generation request body
    fn build_request(handle: &FileHandle, prompt: &TranscriptionPrompt) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part {
                        text: None,
                        file_data: Some(FileData {
                            mime_type: handle.mime_type.clone(),
                            file_uri: handle.uri.clone(),
                        }),
                    },
                    Part {
                        text: Some(prompt.content().to_string()),
                        file_data: None,
                    },
                ],
            }],
        }
    }

    /// Extract text from response
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let parts: Vec<&str> = response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }

    /// Map the Files API state string
    fn parse_state(state: Option<&str>) -> Result<RemoteFileState, TranscriptionError> {
        match state {
            None | Some("STATE_UNSPECIFIED") | Some("PROCESSING") => Ok(RemoteFileState::Pending),
            Some("ACTIVE") => Ok(RemoteFileState::Ready),
            Some("FAILED") => Ok(RemoteFileState::Failed),
            Some(other) => Err(TranscriptionError::ParseError(format!(
                "unknown file state: {}",
                other
            ))),
        }
    }

    /// Drop the URL from transport errors; task errors are shown to clients
    fn request_failed(err: reqwest::Error) -> TranscriptionError {
        TranscriptionError::RequestFailed(err.without_url().to_string())
    }

    fn parse_failed(err: reqwest::Error) -> TranscriptionError {
        TranscriptionError::ParseError(err.without_url().to_string())
    }

    /// Turn non-success HTTP statuses into errors
    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TranscriptionError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TranscriptionError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptionError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            if error_text.contains("API_KEY_INVALID") {
                return Err(TranscriptionError::InvalidApiKey);
            }
            return Err(TranscriptionError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl Transcriber for GeminiTranscriber {
    async fn upload(&self, audio: &AudioFile) -> Result<FileHandle, TranscriptionError> {
        let data = tokio::fs::read(audio.path())
            .await
            .map_err(|e| TranscriptionError::ReadFailed(e.to_string()))?;

        // Open a resumable upload session
        let response = self
            .client
            .post(self.upload_url())
            .header(API_KEY_HEADER, &self.api_key)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", data.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", audio.mime_type())
            .json(&StartUploadRequest {
                file: UploadMetadata {
                    display_name: audio.display_name().to_string(),
                },
            })
            .send()
            .await
            .map_err(Self::request_failed)?;

        let response = Self::check_status(response).await?;
        let session_url = response
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                TranscriptionError::ParseError("missing upload session URL".to_string())
            })?;

        // Send the bytes and finalize in one request
        let response = self
            .client
            .post(&session_url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(data)
            .send()
            .await
            .map_err(Self::request_failed)?;

        let uploaded: UploadResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(Self::parse_failed)?;

        Ok(FileHandle {
            mime_type: uploaded
                .file
                .mime_type
                .unwrap_or_else(|| audio.mime_type().to_string()),
            name: uploaded.file.name,
            uri: uploaded.file.uri,
        })
    }

    async fn file_state(&self, handle: &FileHandle) -> Result<RemoteFileState, TranscriptionError> {
        let response = self
            .client
            .get(self.file_url(&handle.name))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(Self::request_failed)?;

        let file: GeminiFile = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(Self::parse_failed)?;

        Self::parse_state(file.state.as_deref())
    }

    async fn generate(
        &self,
        handle: &FileHandle,
        prompt: &TranscriptionPrompt,
    ) -> Result<String, TranscriptionError> {
        let body = Self::build_request(handle, prompt);

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::request_failed)?;

        // Parse response
        let response: GenerateContentResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(Self::parse_failed)?;

        // Check for API error in response body
        if let Some(error) = response.error {
            return Err(TranscriptionError::ApiError(error.message));
        }

        let text = Self::extract_text(&response).ok_or(TranscriptionError::EmptyResponse)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TranscriptionError::EmptyResponse);
        }

        Ok(trimmed.to_string())
    }
}
