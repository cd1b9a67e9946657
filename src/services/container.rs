//! Service container - one constructed set of services per process.
//!
//! Services are built once from the database connection and passed by
//! reference into request handlers; use-case logic never reaches for
//! ambient globals.

use std::sync::Arc;

use super::{AuthService, TodoService, UserService};
use crate::config::Config;

/// Concrete service container
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    todo_service: Arc<dyn TodoService>,
}

impl Services {
    /// Create a new service container from already-built services
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        todo_service: Arc<dyn TodoService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            todo_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{Authenticator, TodoManager, UserManager};
        use crate::infra::{TodoStore, UserStore};

        let users = Arc::new(UserStore::new(db.clone()));
        let todos = Arc::new(TodoStore::new(db));

        let auth_service = Arc::new(Authenticator::new(users.clone(), config));
        let user_service = Arc::new(UserManager::new(users));
        let todo_service = Arc::new(TodoManager::new(todos));

        Self {
            auth_service,
            user_service,
            todo_service,
        }
    }

    /// Get authentication service
    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    /// Get user service
    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    /// Get todo service
    pub fn todos(&self) -> Arc<dyn TodoService> {
        self.todo_service.clone()
    }
}
