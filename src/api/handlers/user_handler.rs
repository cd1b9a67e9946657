//! Profile handlers (the protected part of /users).
//!
//! Each handler passes the acting identity from the request extension
//! into the service; the self-only rule lives in the service, not here.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::ProfileUpdate;
use crate::types::ApiResponse;

/// Profile update request; all fields optional
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New email address
    #[validate(email(message = "Please provide a valid email address."))]
    #[schema(example = "new@example.com")]
    pub email: Option<String>,
    /// New password (8 to 128 characters; the upper bound is enforced
    /// by the domain policy)
    #[validate(length(min = 8, message = "Password must be at least 8 characters long."))]
    pub password: Option<String>,
    /// New display name
    #[validate(length(min = 2, max = 100, message = "Name must be at least 2 characters long."))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
}

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    /// The password currently on the account
    #[validate(length(min = 1, message = "Current password is required."))]
    pub current_password: String,
    /// The replacement password (8 to 128 characters; the upper bound is
    /// enforced by the domain policy)
    #[validate(length(min = 8, message = "Password must be at least 8 characters long."))]
    pub password: String,
}

/// Email change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmailRequest {
    /// The replacement email address
    #[validate(email(message = "Please provide a valid email address."))]
    #[schema(example = "new@example.com")]
    pub new_email: String,
    /// The password currently on the account
    #[validate(length(min = 1, message = "Current password is required."))]
    pub current_password: String,
}

/// Create protected user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/password", put(update_password))
        .route("/:id/email", put(update_email))
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/users/profile",
    tag = "User Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current profile", body = UserResponse),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .user_service
        .get_profile(current_user.id, current_user.id)
        .await?;

    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// Get a user by id (only your own)
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "User Profile",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Not your profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_profile(id, current_user.id).await?;

    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}

/// Update profile fields (email, password, name)
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "User Profile",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not your profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let update = ProfileUpdate {
        email: payload.email,
        name: payload.name,
        password: payload.password,
    };

    let user = state
        .user_service
        .update_profile(id, update, current_user.id)
        .await?;

    Ok(Json(ApiResponse::with_message(
        UserResponse::from(user),
        "User updated successfully",
    )))
}

/// Change password, verifying the current one first
#[utoipa::path(
    put,
    path = "/users/{id}/password",
    tag = "User Profile",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated successfully"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Wrong current password or not your profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_password(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .user_service
        .change_password(
            id,
            &payload.current_password,
            &payload.password,
            current_user.id,
        )
        .await?;

    Ok(Json(ApiResponse::message("Password updated successfully.")))
}

/// Change email, verifying the current password first
#[utoipa::path(
    put,
    path = "/users/{id}/email",
    tag = "User Profile",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateEmailRequest,
    responses(
        (status = 200, description = "Email updated successfully", body = UserResponse),
        (status = 400, description = "Validation error or duplicate email"),
        (status = 401, description = "Wrong current password or not your profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_email(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateEmailRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state
        .user_service
        .change_email(
            id,
            &payload.new_email,
            &payload.current_password,
            current_user.id,
        )
        .await?;

    Ok(Json(ApiResponse::with_message(
        UserResponse::from(user),
        "Email updated successfully",
    )))
}

/// Delete the account (and, via the store cascade, its todos)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "User Profile",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 401, description = "Not your profile"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .user_service
        .delete_account(id, current_user.id)
        .await?;

    Ok(Json(ApiResponse::message("User deleted successfully.")))
}
