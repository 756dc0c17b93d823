/// Tag endpoints
///
/// Tags are global, so these routes only require an authenticated caller;
/// there is no per-tag ownership to check.
///
/// # Endpoints
///
/// - `POST /tasks/tag` - Create a tag
/// - `GET /tasks/:id/tags` - Labels attached to a task
/// - `POST /tasks/:id/tags` - Attach a tag to a task by label
/// - `DELETE /tasks/:id/tags/:tag_id` - Detach a tag from a task
/// - `DELETE /tasks/tags/:id` - Delete a tag and all of its links

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::MessageResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskhub_shared::models::tag::{Tag, TaskTag};

/// Tag label request body
#[derive(Debug, Deserialize)]
pub struct TagLabelRequest {
    /// Tag label
    #[serde(default)]
    pub label: String,
}

/// Create a tag
///
/// # Errors
///
/// - `400 Bad Request`: Missing label
/// - `409 Conflict`: Label already exists
pub async fn create_tag(
    State(state): State<AppState>,
    Json(req): Json<TagLabelRequest>,
) -> ApiResult<(StatusCode, Json<Tag>)> {
    if req.label.is_empty() {
        return Err(ApiError::BadRequest("Tag label is required".to_string()));
    }

    let tag = state.tags.create_tag(&req.label).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// Labels attached to a task
///
/// # Errors
///
/// - `404 Not Found`: No task with this id exists
pub async fn get_task_tags(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<String>>> {
    let labels = state.tags.get_task_tags(id).await?;
    Ok(Json(labels))
}

/// Attach a tag to a task by label, creating the tag if needed
///
/// # Errors
///
/// - `400 Bad Request`: Missing label
pub async fn add_tag_to_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TagLabelRequest>,
) -> ApiResult<Json<TaskTag>> {
    if req.label.is_empty() {
        return Err(ApiError::BadRequest("Tag label is required".to_string()));
    }

    let task_tag = state.tags.add_tag_to_task(id, &req.label).await?;
    Ok(Json(task_tag))
}

/// Detach a tag from a task
pub async fn remove_tag_from_task(
    State(state): State<AppState>,
    Path((id, tag_id)): Path<(i64, i64)>,
) -> ApiResult<Json<MessageResponse>> {
    state.tags.remove_tag_from_task(id, tag_id).await?;
    Ok(Json(MessageResponse::new(
        "Successfully removed tag from task",
    )))
}

/// Delete a tag and all of its task links
///
/// # Errors
///
/// - `404 Not Found`: No tag with this id exists
pub async fn remove_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.tags.remove_tag(id).await?;
    Ok(Json(MessageResponse::new("Successfully removed tag")))
}
