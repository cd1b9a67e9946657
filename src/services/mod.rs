//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits for
//! dependency inversion, and every operation receives the acting
//! identity explicitly.

mod auth_service;
pub mod container;
mod todo_service;
mod user_service;

// Service Container
pub use container::Services;

// Service traits and implementations
pub use auth_service::{AuthService, AuthenticatedUser, Authenticator, Claims, TokenResponse};
pub use todo_service::{NewTodo, TodoManager, TodoService, TodoUpdate};
pub use user_service::{ProfileUpdate, UserManager, UserService};
