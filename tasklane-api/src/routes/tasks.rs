/// Task CRUD endpoints
///
/// All routes live under `/api/:user_id/tasks` and require a Bearer token.
/// The authentication middleware has already verified the token and stashed
/// the [`Principal`] in request extensions; each handler's first step is the
/// shared ownership check against the path's user id, then a single store
/// call, then status mapping.
///
/// A task that doesn't exist and a task owned by someone else produce the
/// same 404. The path user id is what gets authorized; the task id is only
/// ever combined with it in one scoped query.
///
/// # Endpoints
///
/// - `GET    /api/:user_id/tasks` - List the user's tasks
/// - `POST   /api/:user_id/tasks` - Create a task
/// - `GET    /api/:user_id/tasks/:id` - Fetch one task
/// - `PUT    /api/:user_id/tasks/:id` - Partial update (title/description)
/// - `DELETE /api/:user_id/tasks/:id` - Delete
/// - `PATCH  /api/:user_id/tasks/:id/complete` - Set the completion flag

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tasklane_shared::{
    auth::guard::{self, Principal},
    models::task::{CreateTask, Task, UpdateTask},
};

/// Create-task request body
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title (must be non-empty after trimming)
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Update-task request body; omitted fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,
}

/// Completion request body
#[derive(Debug, Deserialize)]
pub struct CompleteTaskRequest {
    /// Desired completion state
    pub completed: bool,
}

/// Simple message envelope (used by delete)
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Validates and trims a title, rejecting blank input.
fn validated_title(title: &str) -> Result<String, ApiError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ApiError::invalid_field("title", "Task title is required"));
    }
    Ok(trimmed.to_string())
}

/// List all tasks owned by the path user
///
/// `GET /api/:user_id/tasks` → 200 `[Task...]`
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<Task>>> {
    guard::require_owner(&principal, user_id)?;

    let tasks = Task::list_by_user(&state.db, user_id).await?;

    Ok(Json(tasks))
}

/// Create a task for the path user
///
/// `POST /api/:user_id/tasks` → 200 Task, 422 on blank title
pub async fn create_task(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<i64>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<Task>> {
    guard::require_owner(&principal, user_id)?;

    let title = validated_title(&req.title)?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id,
            title,
            description: req.description,
        },
    )
    .await?;

    tracing::debug!(task_id = task.id, user_id, "Created task");

    Ok(Json(task))
}

/// Fetch a single task
///
/// `GET /api/:user_id/tasks/:id` → 200 Task, 404 when absent or not owned
pub async fn get_task(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((user_id, id)): Path<(i64, i64)>,
) -> ApiResult<Json<Task>> {
    guard::require_owner(&principal, user_id)?;

    let task = Task::find_by_id_and_user(&state.db, id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Partially update a task
///
/// `PUT /api/:user_id/tasks/:id` → 200 Task. Only provided fields change;
/// a provided-but-blank title is a 422.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((user_id, id)): Path<(i64, i64)>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    guard::require_owner(&principal, user_id)?;

    let title = req.title.as_deref().map(validated_title).transpose()?;

    let task = Task::update(
        &state.db,
        id,
        user_id,
        UpdateTask {
            title,
            description: req.description,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Delete a task
///
/// `DELETE /api/:user_id/tasks/:id` → 200 `{message}`, 404 when absent or
/// not owned
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((user_id, id)): Path<(i64, i64)>,
) -> ApiResult<Json<MessageResponse>> {
    guard::require_owner(&principal, user_id)?;

    let deleted = Task::delete(&state.db, id, user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    tracing::debug!(task_id = id, user_id, "Deleted task");

    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Set the completion flag
///
/// `PATCH /api/:user_id/tasks/:id/complete` → 200 Task. Idempotent:
/// repeating the same flag is not an error.
pub async fn complete_task(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((user_id, id)): Path<(i64, i64)>,
    Json(req): Json<CompleteTaskRequest>,
) -> ApiResult<Json<Task>> {
    guard::require_owner(&principal, user_id)?;

    let task = Task::set_completion(&state.db, id, user_id, req.completed)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}
