//! Application state - Dependency injection container for the router.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{AuthService, Services, TodoService, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Todo service
    pub todo_service: Arc<dyn TodoService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            todo_service: container.todos(),
            database,
        }
    }

    /// Create application state with manually injected services
    /// (used by tests that substitute mocks).
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        todo_service: Arc<dyn TodoService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            todo_service,
            database,
        }
    }
}
