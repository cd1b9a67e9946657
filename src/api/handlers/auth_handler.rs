//! Registration and login handlers (the public part of /users).

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::ApiResponse;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User email address
    #[validate(
        email(message = "Please provide a valid email address."),
        length(min = 5, max = 255, message = "Please provide a valid email address.")
    )]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (8 to 128 characters; the upper bound is enforced
    /// by the domain policy)
    #[validate(length(min = 8, message = "Password must be at least 8 characters long."))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// User display name
    #[validate(length(min = 2, max = 100, message = "Name must be at least 2 characters long."))]
    #[schema(example = "John Doe")]
    pub name: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Please provide a valid email address."))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[validate(length(min = 1, message = "Email and password are required."))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Login response payload: the issued token plus the safe user projection
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginData {
    pub token: TokenResponse,
    pub user: UserResponse,
}

/// Create public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error or duplicate email")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state
        .auth_service
        .register(payload.email, payload.password, payload.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            UserResponse::from(user),
            "User registered successfully",
        )),
    ))
}

/// Login and get a JWT token
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginData),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginData>>> {
    let authenticated = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(ApiResponse::with_message(
        LoginData {
            token: authenticated.token,
            user: UserResponse::from(authenticated.user),
        },
        "Login successful",
    )))
}
