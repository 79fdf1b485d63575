/// User CRUD endpoints
///
/// This module provides the User resource handlers:
/// - List all users
/// - Get one user by ID
/// - List a user's tasks
/// - Create a user (with a derived slug)
/// - Update a user's mutable fields
/// - Delete a user (cascades to the user's tasks)
///
/// Unlike the task routes, these are keyed by the `:user_id` path segment.
///
/// # Endpoints
///
/// - `GET /user/all_users` - List all users
/// - `GET /user/user_id/:user_id` - Get one user
/// - `GET /user/user_id/:user_id/tasks` - List a user's tasks
/// - `POST /user/create` - Create a user
/// - `PUT /user/update/:user_id` - Update a user
/// - `DELETE /user/delete/:user_id` - Delete a user

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::TransactionStatus,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use heck::ToKebabCase;
use serde::Deserialize;
use taskboard_shared::models::{
    task::Task,
    user::{CreateUser, UpdateUser, User},
};
use validator::Validate;

/// Create user request body
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login/display name; must be unique
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,

    /// First name
    #[validate(length(min = 1, message = "First name must not be empty"))]
    pub firstname: String,

    /// Last name
    #[validate(length(min = 1, message = "Last name must not be empty"))]
    pub lastname: String,

    /// Age in years
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: i64,
}

/// Update user request body
///
/// Username and slug are identity fields and stay fixed after creation.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
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

/// Builds the User resource router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all_users", get(list_users))
        .route("/user_id/:user_id", get(get_user))
        .route("/user_id/:user_id/tasks", get(list_user_tasks))
        .route("/create", post(create_user))
        .route("/update/:user_id", put(update_user))
        .route("/delete/:user_id", delete(delete_user))
}

/// Lists every user
///
/// # Endpoint
///
/// ```text
/// GET /user/all_users
/// ```
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = User::list(&state.db).await?;
    Ok(Json(users))
}

/// Gets one user by ID
///
/// # Endpoint
///
/// ```text
/// GET /user/user_id/{user_id}
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No user with that ID exists
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User was not found".to_string()))?;

    Ok(Json(user))
}

/// Lists the tasks owned by one user
///
/// # Endpoint
///
/// ```text
/// GET /user/user_id/{user_id}/tasks
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No user with that ID exists
pub async fn list_user_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<Task>>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User was not found".to_string()))?;

    let tasks = Task::list_by_user(&state.db, user.id).await?;

    Ok(Json(tasks))
}

/// Creates a new user
///
/// The slug is derived from the username (kebab-case) at creation and never
/// changes afterwards.
///
/// # Endpoint
///
/// ```text
/// POST /user/create
/// Content-Type: application/json
///
/// {
///   "username": "John Doe",
///   "firstname": "John",
///   "lastname": "Doe",
///   "age": 34
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `{"status_code": 201, "transaction": "Successful"}`
///
/// # Errors
///
/// - `409 Conflict`: Username or slug already exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<TransactionStatus>)> {
    req.validate()?;

    let slug = req.username.to_kebab_case();

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            firstname: req.firstname,
            lastname: req.lastname,
            age: req.age,
            slug,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok((
        StatusCode::CREATED,
        Json(TransactionStatus::new(201, "Successful")),
    ))
}

/// Updates a user's mutable fields
///
/// Overwrites firstname, lastname, and age; username and slug are left
/// untouched.
///
/// # Endpoint
///
/// ```text
/// PUT /user/update/{user_id}
/// Content-Type: application/json
///
/// {
///   "firstname": "Jane",
///   "lastname": "Doe",
///   "age": 35
/// }
/// ```
///
/// # Response
///
/// `200 OK` with
/// `{"status_code": 200, "transaction": "User update is successful!"}`
///
/// # Errors
///
/// - `404 Not Found`: No user with that ID exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<(StatusCode, Json<TransactionStatus>)> {
    req.validate()?;

    let updated = User::update(
        &state.db,
        user_id,
        UpdateUser {
            firstname: req.firstname,
            lastname: req.lastname,
            age: req.age,
        },
    )
    .await?;

    if updated.is_none() {
        return Err(ApiError::NotFound("User was not found".to_string()));
    }

    tracing::info!(user_id = %user_id, "User updated");

    Ok((
        StatusCode::OK,
        Json(TransactionStatus::new(200, "User update is successful!")),
    ))
}

/// Deletes a user and, by cascade, the user's tasks
///
/// # Endpoint
///
/// ```text
/// DELETE /user/delete/{user_id}
/// ```
///
/// # Response
///
/// `204 No Content` with
/// `{"status_code": 204, "transaction": "User deleted successfully!"}`
///
/// # Errors
///
/// - `404 Not Found`: No user with that ID exists
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<(StatusCode, Json<TransactionStatus>)> {
    let deleted = User::delete(&state.db, user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("User was not found".to_string()));
    }

    tracing::info!(user_id = %user_id, "User deleted");

    Ok((
        StatusCode::NO_CONTENT,
        Json(TransactionStatus::new(204, "User deleted successfully!")),
    ))
}
