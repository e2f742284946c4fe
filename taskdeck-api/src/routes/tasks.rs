/// Task endpoints
///
/// All endpoints here sit behind the bearer-token middleware and operate on
/// the authenticated user's own tasks only. A task belonging to another user
/// is indistinguishable from a missing one: both are 404.
///
/// # Endpoints
///
/// - `POST   /v1/tasks` - Create a task
/// - `GET    /v1/tasks?status=&search=` - List tasks, optionally filtered
/// - `GET    /v1/tasks/:id` - Fetch one task
/// - `PATCH  /v1/tasks/:id/status` - Update a task's status
/// - `DELETE /v1/tasks/:id` - Delete a task

use crate::{
    app::{AppState, CurrentUser},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::models::task::{Task, TaskFilter, TaskStatus};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Short title
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    /// Free-text description
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,
}

/// List tasks query parameters
///
/// Both are optional and AND-ed when present.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Narrow to tasks with this status
    pub status: Option<TaskStatus>,

    /// Narrow to tasks whose title or description contains this text
    /// (case-insensitive)
    pub search: Option<String>,
}

/// Update status request
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// The new status
    pub status: TaskStatus,
}

/// Create a task
///
/// The task always starts as `open`, owned by the authenticated user.
///
/// # Endpoint
///
/// ```text
/// POST /v1/tasks
/// Content-Type: application/json
///
/// {
///   "title": "buy milk",
///   "description": "2%"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Server error
pub async fn create_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate().map_err(ApiError::from)?;

    let task = state
        .tasks
        .create_task(&user, &req.title, &req.description)
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// List the authenticated user's tasks
///
/// # Endpoint
///
/// ```text
/// GET /v1/tasks?status=done&search=milk
/// ```
///
/// Results are ordered by id and stable across repeated calls over unchanged
/// data.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let filter = TaskFilter {
        status: query.status,
        search: query.search,
    };

    let tasks = state.tasks.list_tasks(&user, &filter).await?;

    Ok(Json(tasks))
}

/// Fetch one task by id
///
/// # Errors
///
/// - `404 Not Found`: No such task for this user
pub async fn get_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.get_task(&user, id).await?;

    Ok(Json(task))
}

/// Update a task's status
///
/// # Endpoint
///
/// ```text
/// PATCH /v1/tasks/42/status
/// Content-Type: application/json
///
/// {
///   "status": "done"
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such task for this user
pub async fn update_task_status(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.update_status(&user, id, req.status).await?;

    Ok(Json(task))
}

/// Delete a task
///
/// # Errors
///
/// - `404 Not Found`: No such task for this user
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.tasks.delete_task(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
