use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::domain::task::{Task, TaskId, TaskStatus};
use crate::http::error::ApiError;
use crate::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Task> for StatusResponse {
    fn from(task: &Task) -> Self {
        Self {
            status: task.status(),
            transcript: task.result().map(str::to_string),
            error: task.error().map(str::to_string),
            created_at: task.created_at().to_rfc3339(),
            updated_at: task.updated_at().to_rfc3339(),
        }
    }
}

/// Report a task's progress. Ids that are not UUIDs are simply unknown.
#[tracing::instrument(skip(state))]
pub async fn status_handler(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let not_found = || ApiError::not_found("Task not found");

    let id: TaskId = task_id.parse().map_err(|_| not_found())?;
    let task = state.service.status(id).await?.ok_or_else(not_found)?;

    Ok(Json(StatusResponse::from(&task)))
}
