/// Task CRUD endpoints
///
/// This module provides the Task resource handlers:
/// - List all tasks
/// - Get one task by ID
/// - Create a task for an existing user
/// - Update a task's mutable fields
/// - Delete a task
///
/// # Endpoints
///
/// - `GET /task/all_users` - List all tasks
/// - `GET /task/user_id/:id` - Get one task by its ID
/// - `POST /task/create?user_id={id}` - Create a task for a user
/// - `PUT /task/update/:user_id?task_id={id}` - Update a task
/// - `DELETE /task/delete/:user_id?task_id={id}` - Delete a task
///
/// # Route quirks (kept on purpose)
///
/// The public route names predate this server and are preserved verbatim:
/// the task listing lives at `/all_users`, the get route's `:id` segment is
/// the *task* primary key, and the update/delete routes declare a `:user_id`
/// path segment whose value is accepted but never read - those handlers
/// address the task through the `task_id` query parameter alone.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::TransactionStatus,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use taskboard_shared::models::{
    task::{CreateTask, Task, UpdateTask},
    user::User,
};
use validator::Validate;

/// Create task request body
///
/// The owning user is passed as the `user_id` query parameter, not in the
/// body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Short task name
    #[validate(length(min = 1, message = "Task name must not be empty"))]
    pub taskname: String,

    /// Owner's first name
    #[validate(length(min = 1, message = "First name must not be empty"))]
    pub firstname: String,

    /// Owner's last name
    #[validate(length(min = 1, message = "Last name must not be empty"))]
    pub lastname: String,

    /// Owner's age
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: i64,

    /// Task title
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    /// Longer task description
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,
}

/// Update task request body
///
/// Covers the task name and the owner snapshot fields only; `title` and
/// `description` are not updatable through this endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// Replacement task name
    #[validate(length(min = 1, message = "Task name must not be empty"))]
    pub taskname: String,

    /// Replacement first name
    #[validate(length(min = 1, message = "First name must not be empty"))]
    pub firstname: String,

    /// Replacement last name
    #[validate(length(min = 1, message = "Last name must not be empty"))]
    pub lastname: String,

    /// Replacement age
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: i64,
}

/// Query parameters for task creation
#[derive(Debug, Deserialize)]
pub struct CreateTaskQuery {
    /// User the new task belongs to
    pub user_id: i64,
}

/// Query parameters for update and delete
#[derive(Debug, Deserialize)]
pub struct TaskIdQuery {
    /// Task to operate on
    pub task_id: i64,
}

/// Builds the Task resource router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all_users", get(list_tasks))
        .route("/user_id/:id", get(get_task))
        .route("/create", post(create_task))
        .route("/update/:user_id", put(update_task))
        .route("/delete/:user_id", delete(delete_task))
}

/// Lists every task, unfiltered and unpaginated
///
/// # Endpoint
///
/// ```text
/// GET /task/all_users
/// ```
///
/// An empty store yields an empty array.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list(&state.db).await?;
    Ok(Json(tasks))
}

/// Gets one task by its primary key
///
/// # Endpoint
///
/// ```text
/// GET /task/user_id/{id}
/// ```
///
/// The `{id}` segment is the task's own ID despite the route name.
///
/// # Errors
///
/// - `404 Not Found`: No task with that ID exists
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task was not found".to_string()))?;

    Ok(Json(task))
}

/// Creates a task linked to an existing user
///
/// # Endpoint
///
/// ```text
/// POST /task/create?user_id={id}
/// Content-Type: application/json
///
/// {
///   "taskname": "weekly-report",
///   "firstname": "John",
///   "lastname": "Doe",
///   "age": 34,
///   "title": "Write the weekly report",
///   "description": "Summarize progress for the week"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `{"status_code": 201, "transaction": "Successful"}`
///
/// # Errors
///
/// - `404 Not Found`: The referenced user does not exist
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: The insert failed; the body carries the
///   underlying error text
pub async fn create_task(
    State(state): State<AppState>,
    Query(query): Query<CreateTaskQuery>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TransactionStatus>)> {
    req.validate()?;

    // The user must exist before a task can reference it
    let user = User::find_by_id(&state.db, query.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User was not found".to_string()))?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: user.id,
            taskname: req.taskname,
            firstname: req.firstname,
            lastname: req.lastname,
            age: req.age,
            title: req.title,
            description: req.description,
        },
    )
    .await
    .map_err(|e| {
        tracing::error!(user_id = %user.id, error = %e, "Task creation failed");
        ApiError::InternalError(e.to_string())
    })?;

    tracing::info!(task_id = %task.id, user_id = %user.id, "Task created");

    Ok((
        StatusCode::CREATED,
        Json(TransactionStatus::new(201, "Successful")),
    ))
}

/// Updates a task's mutable fields
///
/// # Endpoint
///
/// ```text
/// PUT /task/update/{user_id}?task_id={id}
/// Content-Type: application/json
///
/// {
///   "taskname": "weekly-report",
///   "firstname": "Jane",
///   "lastname": "Doe",
///   "age": 35
/// }
/// ```
///
/// The `{user_id}` path segment is accepted and ignored; the task is
/// addressed by `task_id`. Title and description are left untouched.
///
/// # Response
///
/// `200 OK` with
/// `{"status_code": 200, "transaction": "Task update is successful!"}`
///
/// # Errors
///
/// - `404 Not Found`: No task with that ID exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_task(
    State(state): State<AppState>,
    Query(query): Query<TaskIdQuery>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TransactionStatus>)> {
    req.validate()?;

    // Read-modify-write: fetch first so a missing task is a clean 404
    let existing = Task::find_by_id(&state.db, query.task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task was not found".to_string()))?;

    Task::update(
        &state.db,
        existing.id,
        UpdateTask {
            taskname: req.taskname,
            firstname: req.firstname,
            lastname: req.lastname,
            age: req.age,
        },
    )
    .await?;

    tracing::info!(task_id = %existing.id, "Task updated");

    Ok((
        StatusCode::OK,
        Json(TransactionStatus::new(200, "Task update is successful!")),
    ))
}

/// Deletes a task
///
/// # Endpoint
///
/// ```text
/// DELETE /task/delete/{user_id}?task_id={id}
/// ```
///
/// The `{user_id}` path segment is accepted and ignored; the task is
/// addressed by `task_id`.
///
/// # Response
///
/// `204 No Content` with
/// `{"status_code": 204, "transaction": "Task deleted successfully!"}`
///
/// # Errors
///
/// - `404 Not Found`: No task with that ID exists
pub async fn delete_task(
    State(state): State<AppState>,
    Query(query): Query<TaskIdQuery>,
) -> ApiResult<(StatusCode, Json<TransactionStatus>)> {
    let deleted = Task::delete(&state.db, query.task_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task was not found".to_string()));
    }

    tracing::info!(task_id = %query.task_id, "Task deleted");

    Ok((
        StatusCode::NO_CONTENT,
        Json(TransactionStatus::new(204, "Task deleted successfully!")),
    ))
}
