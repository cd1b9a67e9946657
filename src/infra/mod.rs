//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repository implementations over SeaORM

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    TodoChanges, TodoRepository, TodoStore, UserChanges, UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockTodoRepository, MockUserRepository};
