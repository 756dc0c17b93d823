/// Task endpoints
///
/// All routes here run behind the bearer-auth middleware; the caller
/// identity arrives as an `AuthUser` extension and is passed to the task
/// service, which enforces visibility. Enum membership (status, priority,
/// sort field, sort order) is validated here, before the service is
/// invoked.
///
/// # Endpoints
///
/// - `POST /tasks/create` - Create a task with tags
/// - `GET /tasks/user` - List tasks owned by or assigned to the caller
/// - `GET /tasks/:id` - Get one task (owner or assignee only)
/// - `POST /tasks/:id/update` - Apply partial updates
/// - `DELETE /tasks/:id` - Delete a task
/// - `POST /tasks/:id/assign` - Reassign a task
/// - `GET /tasks/filter/:status` - Owner's tasks with a status
/// - `GET /tasks/sort/:field/:order` - Owner's tasks, sorted
/// - `GET /tasks/filter/:status/sort/:field/:order` - Filtered and sorted

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    routes::MessageResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskhub_shared::{
    auth::middleware::AuthUser,
    models::task::{Priority, SortField, SortOrder, Status, UpdateTaskFields},
    services::task_service::{CreateTaskInput, TaskView},
};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Due date
    pub due_date: DateTime<Utc>,

    /// Priority wire value (1, 2, 3); defaults to low
    pub priority: Option<i16>,

    /// Status wire value; defaults to "To-do"
    pub status: Option<String>,

    /// Tag labels to attach (find-or-create)
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Create task response
#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    /// Human-readable result
    pub message: String,

    /// The created task with resolved associations
    pub task: TaskView,
}

/// Update task request; only provided fields are applied
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New due date
    pub due_date: Option<DateTime<Utc>>,

    /// New priority wire value
    pub priority: Option<i16>,

    /// New status wire value
    pub status: Option<String>,
}

/// Assign task request
#[derive(Debug, Deserialize)]
pub struct AssignTaskRequest {
    /// User to assign the task to
    pub assignee: i64,
}

/// Validates a wire status value
fn parse_status(value: &str) -> ApiResult<Status> {
    Status::parse(value)
        .ok_or_else(|| ApiError::BadRequest(format!("{} is not a valid status", value)))
}

/// Validates a wire priority value
fn parse_priority(value: i16) -> ApiResult<Priority> {
    Priority::from_i16(value)
        .ok_or_else(|| ApiError::BadRequest(format!("{} is not a valid priority", value)))
}

/// Validates a wire sort field
fn parse_sort_field(value: &str) -> ApiResult<SortField> {
    SortField::parse(value)
        .ok_or_else(|| ApiError::BadRequest(format!("{} is not a valid field name", value)))
}

/// Validates a wire sort order
fn parse_sort_order(value: &str) -> ApiResult<SortOrder> {
    SortOrder::parse(value)
        .ok_or_else(|| ApiError::BadRequest(format!("{} is not a valid sort order", value)))
}

/// Create a task
///
/// # Endpoint
///
/// ```text
/// POST /tasks/create
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "title": "Write report",
///   "description": "quarterly numbers",
///   "dueDate": "2025-03-14T00:00:00Z",
///   "priority": 1,
///   "status": "To-do",
///   "tags": ["reports", "q1"]
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Invalid status or priority value
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<CreateTaskResponse>)> {
    req.validate().map_err(|e| {
        let errors: Vec<ValidationErrorDetail> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        ApiError::ValidationError(errors)
    })?;

    let status = match req.status.as_deref() {
        Some(value) => parse_status(value)?,
        None => Status::Todo,
    };

    let priority = match req.priority {
        Some(value) => parse_priority(value)?,
        None => Priority::Low,
    };

    let task = state
        .tasks
        .create_task(CreateTaskInput {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
            priority,
            status,
            tags: req.tags,
            user_id: auth.id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTaskResponse {
            message: "Task created successfully".to_string(),
            task,
        }),
    ))
}

/// List every task the caller owns or is assigned to
pub async fn get_user_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<Vec<TaskView>>> {
    let tasks = state.tasks.get_user_tasks(auth.id).await?;
    Ok(Json(tasks))
}

/// Get one task by id
///
/// # Errors
///
/// - `404 Not Found`: The task does not exist or is not visible to the
///   caller; the two cases are indistinguishable by design.
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<TaskView>> {
    let task = state.tasks.get_task_by_id(id, auth.id).await?;
    Ok(Json(task))
}

/// Apply partial updates to a task
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let status = match req.status.as_deref() {
        Some(value) => Some(parse_status(value)?),
        None => None,
    };

    let priority = match req.priority {
        Some(value) => Some(parse_priority(value)?),
        None => None,
    };

    let fields = UpdateTaskFields {
        title: req.title,
        description: req.description.map(Some),
        due_date: req.due_date,
        priority,
        status,
    };

    state.tasks.update_task(id, auth.id, fields).await?;

    Ok(Json(MessageResponse::new("Task updated successfully")))
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.tasks.delete_task(id, auth.id).await?;
    Ok(Json(MessageResponse::new("Task deleted")))
}

/// Reassign a task to another user
///
/// # Errors
///
/// - `403 Forbidden`: Caller is neither the owner nor the current assignee
/// - `404 Not Found`: Task invisible/absent, or target user missing
pub async fn assign_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<AssignTaskRequest>,
) -> ApiResult<Json<TaskView>> {
    let task = state.tasks.assign_task(id, auth.id, req.assignee).await?;
    Ok(Json(task))
}

/// List the caller's owned tasks with a status
pub async fn filter_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(status): Path<String>,
) -> ApiResult<Json<Vec<TaskView>>> {
    let status = parse_status(&status)?;

    let tasks = state.tasks.get_tasks_by_status(auth.id, status).await?;
    Ok(Json(tasks))
}

/// List the caller's owned tasks, sorted
pub async fn sort_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((field, order)): Path<(String, String)>,
) -> ApiResult<Json<Vec<TaskView>>> {
    let field = parse_sort_field(&field)?;
    let order = parse_sort_order(&order)?;

    let tasks = state.tasks.get_sorted_tasks(auth.id, field, order).await?;
    Ok(Json(tasks))
}

/// List the caller's owned tasks with a status, sorted
pub async fn filter_and_sort_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((status, field, order)): Path<(String, String, String)>,
) -> ApiResult<Json<Vec<TaskView>>> {
    let field = parse_sort_field(&field)?;
    let order = parse_sort_order(&order)?;
    let status = parse_status(&status)?;

    let tasks = state
        .tasks
        .get_sorted_and_filtered_tasks(auth.id, field, order, status)
        .await?;
    Ok(Json(tasks))
}
