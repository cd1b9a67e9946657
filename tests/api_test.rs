//! Integration tests for API endpoints.
//!
//! These tests drive the real router with mock services, so they cover
//! routing, the auth middleware, request validation, and the response
//! envelope without requiring a database.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use todo_api::api::{create_router, AppState};
use todo_api::domain::{Todo, User};
use todo_api::errors::{AppError, AppResult};
use todo_api::infra::Database;
use todo_api::services::{
    AuthService, AuthenticatedUser, Claims, NewTodo, ProfileUpdate, TodoService, TodoUpdate,
    TokenResponse, UserService,
};

const VALID_TOKEN: &str = "valid-test-token";

fn test_user_id() -> Uuid {
    Uuid::from_u128(0x0123_4567_89ab_cdef)
}

fn unknown_todo_id() -> Uuid {
    Uuid::from_u128(0xdead_beef)
}

fn test_user() -> User {
    User {
        id: test_user_id(),
        email: "test@example.com".to_string(),
        password_hash: "hashed".to_string(),
        name: "Test User".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_todo(id: Uuid, owner_id: Uuid) -> Todo {
    Todo {
        id,
        title: "Buy milk".to_string(),
        content: None,
        completed: false,
        owner_id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// =============================================================================
// Mock Services
// =============================================================================

struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn register(&self, email: String, _password: String, name: String) -> AppResult<User> {
        let mut user = test_user();
        user.email = email.trim().to_lowercase();
        user.name = name;
        Ok(user)
    }

    async fn login(&self, _email: String, _password: String) -> AppResult<AuthenticatedUser> {
        Ok(AuthenticatedUser {
            user: test_user(),
            token: TokenResponse {
                access_token: "mock-token".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 86400,
            },
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == VALID_TOKEN {
            Ok(Claims {
                sub: test_user_id(),
                email: "test@example.com".to_string(),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::authentication("Authentication required"))
        }
    }
}

struct MockUserService;

#[async_trait]
impl UserService for MockUserService {
    async fn get_profile(&self, id: Uuid, current_user_id: Uuid) -> AppResult<User> {
        if id != current_user_id {
            return Err(AppError::authentication(
                "You can only view your own profile.",
            ));
        }
        Ok(test_user())
    }

    async fn update_profile(
        &self,
        _id: Uuid,
        update: ProfileUpdate,
        _current_user_id: Uuid,
    ) -> AppResult<User> {
        let mut user = test_user();
        if let Some(name) = update.name {
            user.name = name;
        }
        Ok(user)
    }

    async fn change_password(
        &self,
        _id: Uuid,
        current_password: &str,
        _new_password: &str,
        _current_user_id: Uuid,
    ) -> AppResult<()> {
        if current_password != "password1" {
            return Err(AppError::authentication("Current password is incorrect."));
        }
        Ok(())
    }

    async fn change_email(
        &self,
        _id: Uuid,
        new_email: &str,
        _current_password: &str,
        _current_user_id: Uuid,
    ) -> AppResult<User> {
        let mut user = test_user();
        user.email = new_email.trim().to_lowercase();
        Ok(user)
    }

    async fn delete_account(&self, _id: Uuid, _current_user_id: Uuid) -> AppResult<()> {
        Ok(())
    }
}

struct MockTodoService;

#[async_trait]
impl TodoService for MockTodoService {
    async fn create_todo(&self, input: NewTodo, owner_id: Uuid) -> AppResult<Todo> {
        let mut todo = test_todo(Uuid::new_v4(), owner_id);
        todo.title = input.title;
        todo.content = input.content;
        todo.completed = input.completed;
        Ok(todo)
    }

    async fn list_todos(&self, owner_id: Uuid) -> AppResult<Vec<Todo>> {
        Ok(vec![
            test_todo(Uuid::new_v4(), owner_id),
            test_todo(Uuid::new_v4(), owner_id),
        ])
    }

    async fn get_todo(&self, id: Uuid, owner_id: Uuid) -> AppResult<Todo> {
        if id == unknown_todo_id() {
            return Err(AppError::not_found(
                "Todo not found or you do not have permission to view this todo.",
            ));
        }
        Ok(test_todo(id, owner_id))
    }

    async fn update_todo(&self, id: Uuid, update: TodoUpdate, owner_id: Uuid) -> AppResult<Todo> {
        if id == unknown_todo_id() {
            return Err(AppError::not_found(
                "Todo not found or you do not have permission to update this todo.",
            ));
        }
        let mut todo = test_todo(id, owner_id);
        if let Some(title) = update.title {
            todo.title = title;
        }
        Ok(todo)
    }

    async fn delete_todo(&self, id: Uuid, owner_id: Uuid) -> AppResult<Todo> {
        if id == unknown_todo_id() {
            return Err(AppError::not_found(
                "Todo not found or you do not have permission to delete this todo.",
            ));
        }
        Ok(test_todo(id, owner_id))
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn app() -> Router {
    let db = Database::from_connection(DatabaseConnection::Disconnected);
    let state = AppState::new(
        Arc::new(MockAuthService),
        Arc::new(MockUserService),
        Arc::new(MockTodoService),
        Arc::new(db),
    );
    create_router(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", VALID_TOKEN))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", VALID_TOKEN))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Authentication endpoints
// =============================================================================

#[tokio::test]
async fn register_returns_201_with_envelope() {
    let request = json_request(
        "POST",
        "/users/register",
        json!({"email": "U@Test.com", "password": "password1", "name": "Al"}),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["email"], "u@test.com");
    // The hash never leaks through the projection
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn register_rejects_weak_password_with_400() {
    let request = json_request(
        "POST",
        "/users/register",
        json!({"email": "u@test.com", "password": "short", "name": "Al"}),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn register_rejects_malformed_json_with_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/users/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_returns_token_and_user() {
    let request = json_request(
        "POST",
        "/users/login",
        json!({"email": "u@test.com", "password": "password1"}),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["token"]["access_token"], "mock-token");
    assert_eq!(body["data"]["user"]["email"], "test@example.com");
}

// =============================================================================
// Auth middleware
// =============================================================================

#[tokio::test]
async fn todos_require_bearer_token() {
    let request = Request::builder()
        .method("GET")
        .uri("/todos")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let request = Request::builder()
        .method("GET")
        .uri("/todos")
        .header(header::AUTHORIZATION, "Bearer nope")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_requires_bearer_token() {
    let request = Request::builder()
        .method("GET")
        .uri("/users/profile")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_returns_current_user() {
    let response = app()
        .oneshot(authed_request("GET", "/users/profile"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], test_user_id().to_string());
}

// =============================================================================
// Todo endpoints
// =============================================================================

#[tokio::test]
async fn create_todo_binds_owner_to_caller_even_with_spoofed_payload() {
    // The payload smuggles an owner_id; the DTO has no such field, so it
    // is ignored and ownership comes from the token identity
    let request = authed_json_request(
        "POST",
        "/todos",
        json!({"title": "Buy milk", "owner_id": Uuid::new_v4().to_string()}),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["owner_id"], test_user_id().to_string());
    assert_eq!(body["data"]["title"], "Buy milk");
}

#[tokio::test]
async fn create_todo_requires_title() {
    let request = authed_json_request("POST", "/todos", json!({"title": ""}));

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_todos_returns_owner_scoped_collection() {
    let response = app()
        .oneshot(authed_request("GET", "/todos"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn foreign_todo_reads_as_not_found() {
    let uri = format!("/todos/{}", unknown_todo_id());
    let response = app().oneshot(authed_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn foreign_todo_update_is_not_found() {
    let uri = format!("/todos/{}", unknown_todo_id());
    let request = authed_json_request("PUT", &uri, json!({"title": "hacked"}));

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_todo_returns_the_removed_record() {
    let todo_id = Uuid::new_v4();
    let uri = format!("/todos/{}", todo_id);

    let response = app().oneshot(authed_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Todo deleted successfully");
    assert_eq!(body["data"]["id"], todo_id.to_string());
}

// =============================================================================
// Profile endpoints
// =============================================================================

#[tokio::test]
async fn password_change_maps_wrong_current_password_to_401() {
    let uri = format!("/users/{}/password", test_user_id());
    let request = authed_json_request(
        "PUT",
        &uri,
        json!({"current_password": "wrong", "password": "newpassword1"}),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn password_change_succeeds_with_correct_current_password() {
    let uri = format!("/users/{}/password", test_user_id());
    let request = authed_json_request(
        "PUT",
        &uri,
        json!({"current_password": "password1", "password": "newpassword1"}),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Password updated successfully.");
}

#[tokio::test]
async fn reading_another_profile_is_rejected() {
    let uri = format!("/users/{}", Uuid::new_v4());
    let response = app().oneshot(authed_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Root endpoint
// =============================================================================

#[tokio::test]
async fn root_reports_service_banner() {
    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["endpoints"]["todos"], "/todos");
}
