use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::application::AudioSubmission;
use crate::http::error::ApiError;
use crate::http::state::AppState;

/// Multipart field carrying the audio file
pub const AUDIO_FIELD: &str = "audio";

const MISSING_AUDIO: &str = "Please provide an audio file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub task_id: String,
}

/// Accept an audio file and start transcribing it in the background
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!(error = %e, "Upload request is not multipart");
        ApiError::bad_request(MISSING_AUDIO)
    })?;
    let mut submission = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        submission = Some(AudioSubmission {
            file_name,
            content_type,
            data,
        });
        break;
    }

    let Some(submission) = submission else {
        tracing::warn!("Upload request without an audio field");
        return Err(ApiError::bad_request(MISSING_AUDIO));
    };
    if submission.file_name.is_empty() {
        tracing::warn!("Upload request with an empty file name");
        return Err(ApiError::bad_request("No selected file"));
    }

    tracing::debug!(
        filename = %submission.file_name,
        bytes = submission.data.len(),
        "Audio file received"
    );

    let task_id = state.service.submit(submission).await?;

    Ok(Json(UploadResponse {
        task_id: task_id.to_string(),
    }))
}
