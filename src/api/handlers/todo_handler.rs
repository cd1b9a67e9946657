//! Todo handlers (all protected).
//!
//! The request DTOs carry no owner field; ownership always comes from the
//! authenticated identity, so authorship cannot be spoofed via payload.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::TodoResponse;
use crate::errors::AppResult;
use crate::services::{NewTodo, TodoUpdate};
use crate::types::ApiResponse;

/// Todo creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTodoRequest {
    /// Todo title (1 to 255 characters)
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters."))]
    #[schema(example = "Buy milk")]
    pub title: String,
    /// Optional longer description (up to 1000 characters)
    #[validate(length(max = 1000, message = "Content must be at most 1000 characters."))]
    pub content: Option<String>,
    /// Completion flag, defaults to false
    pub completed: Option<bool>,
}

/// Todo update request; all fields optional
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTodoRequest {
    /// New title (1 to 255 characters)
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters."))]
    pub title: Option<String>,
    /// New description (up to 1000 characters)
    #[validate(length(max = 1000, message = "Content must be at most 1000 characters."))]
    pub content: Option<String>,
    /// New completion flag
    pub completed: Option<bool>,
}

/// Create protected todo routes
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/:id", get(get_todo).put(update_todo).delete(delete_todo))
}

/// Create a todo for the authenticated user
#[utoipa::path(
    post,
    path = "/todos",
    tag = "Todos",
    security(("bearer_auth" = [])),
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created successfully", body = TodoResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateTodoRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TodoResponse>>)> {
    let input = NewTodo {
        title: payload.title,
        content: payload.content,
        completed: payload.completed.unwrap_or(false),
    };

    let todo = state.todo_service.create_todo(input, current_user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            TodoResponse::from(todo),
            "Todo created successfully",
        )),
    ))
}

/// List the authenticated user's todos, newest first
#[utoipa::path(
    get,
    path = "/todos",
    tag = "Todos",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Todos for the authenticated user", body = [TodoResponse]),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<TodoResponse>>>> {
    let todos = state.todo_service.list_todos(current_user.id).await?;

    Ok(Json(ApiResponse::success(
        todos.into_iter().map(TodoResponse::from).collect(),
    )))
}

/// Get one of the authenticated user's todos
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "Todos",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Todo id")),
    responses(
        (status = 200, description = "The todo", body = TodoResponse),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Absent or owned by someone else")
    )
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TodoResponse>>> {
    let todo = state.todo_service.get_todo(id, current_user.id).await?;

    Ok(Json(ApiResponse::success(TodoResponse::from(todo))))
}

/// Update one of the authenticated user's todos
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "Todos",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Todo id")),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Todo updated successfully", body = TodoResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Absent or owned by someone else")
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTodoRequest>,
) -> AppResult<Json<ApiResponse<TodoResponse>>> {
    let update = TodoUpdate {
        title: payload.title,
        content: payload.content,
        completed: payload.completed,
    };

    let todo = state
        .todo_service
        .update_todo(id, update, current_user.id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        TodoResponse::from(todo),
        "Todo updated successfully",
    )))
}

/// Delete one of the authenticated user's todos
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "Todos",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Todo id")),
    responses(
        (status = 200, description = "Todo deleted successfully", body = TodoResponse),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Absent or owned by someone else")
    )
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TodoResponse>>> {
    let todo = state.todo_service.delete_todo(id, current_user.id).await?;

    Ok(Json(ApiResponse::with_message(
        TodoResponse::from(todo),
        "Todo deleted successfully",
    )))
}
