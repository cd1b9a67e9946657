//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, todo_handler, user_handler};
use crate::domain::{TodoResponse, UserResponse};
use crate::services::TokenResponse;

/// OpenAPI documentation for the Todo List API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo List API",
        version = "0.1.0",
        description = "Multi-tenant todo-list REST API with JWT authentication",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // User endpoints
        user_handler::get_profile,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::update_password,
        user_handler::update_email,
        user_handler::delete_user,
        // Todo endpoints
        todo_handler::create_todo,
        todo_handler::list_todos,
        todo_handler::get_todo,
        todo_handler::update_todo,
        todo_handler::delete_todo,
    ),
    components(
        schemas(
            // Domain projections
            UserResponse,
            TodoResponse,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::LoginData,
            TokenResponse,
            // User handler types
            user_handler::UpdateUserRequest,
            user_handler::UpdatePasswordRequest,
            user_handler::UpdateEmailRequest,
            // Todo handler types
            todo_handler::CreateTodoRequest,
            todo_handler::UpdateTodoRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "User Profile", description = "Self-service account management"),
        (name = "Todos", description = "Ownership-scoped todo operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /users/login"))
                        .build(),
                ),
            );
        }
    }
}
