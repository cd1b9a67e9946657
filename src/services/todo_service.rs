//! Todo service - ownership-scoped CRUD use cases.
//!
//! The owner id always comes from the acting identity; request payloads
//! have no owner field to spoof. Missing and not-owned rows are
//! deliberately indistinguishable (both read as "not found").

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Todo;
use crate::errors::{AppResult, OptionExt};
use crate::infra::{TodoChanges, TodoRepository};

/// Input for [`TodoService::create_todo`].
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub content: Option<String>,
    pub completed: bool,
}

/// Optional fields accepted by [`TodoService::update_todo`].
#[derive(Debug, Clone, Default)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub completed: Option<bool>,
}

/// Todo service trait for dependency injection.
#[async_trait]
pub trait TodoService: Send + Sync {
    /// Create a todo owned by the acting identity
    async fn create_todo(&self, input: NewTodo, owner_id: Uuid) -> AppResult<Todo>;

    /// All todos of the acting identity, newest first
    async fn list_todos(&self, owner_id: Uuid) -> AppResult<Vec<Todo>>;

    /// Fetch one owned todo
    async fn get_todo(&self, id: Uuid, owner_id: Uuid) -> AppResult<Todo>;

    /// Update one owned todo
    async fn update_todo(&self, id: Uuid, update: TodoUpdate, owner_id: Uuid) -> AppResult<Todo>;

    /// Delete one owned todo, returning it
    async fn delete_todo(&self, id: Uuid, owner_id: Uuid) -> AppResult<Todo>;
}

/// Concrete implementation of TodoService.
pub struct TodoManager {
    todos: Arc<dyn TodoRepository>,
}

impl TodoManager {
    /// Create new todo service instance
    pub fn new(todos: Arc<dyn TodoRepository>) -> Self {
        Self { todos }
    }
}

#[async_trait]
impl TodoService for TodoManager {
    async fn create_todo(&self, input: NewTodo, owner_id: Uuid) -> AppResult<Todo> {
        self.todos
            .create(owner_id, input.title, input.content, input.completed)
            .await
    }

    async fn list_todos(&self, owner_id: Uuid) -> AppResult<Vec<Todo>> {
        self.todos.list_by_owner(owner_id).await
    }

    async fn get_todo(&self, id: Uuid, owner_id: Uuid) -> AppResult<Todo> {
        self.todos
            .find_scoped(id, owner_id)
            .await?
            .ok_or_not_found("Todo not found or you do not have permission to view this todo.")
    }

    async fn update_todo(&self, id: Uuid, update: TodoUpdate, owner_id: Uuid) -> AppResult<Todo> {
        // Ownership probe first; a scoped row that vanishes between the
        // probe and the write fails inside update_scoped and propagates.
        self.todos
            .find_scoped(id, owner_id)
            .await?
            .ok_or_not_found("Todo not found or you do not have permission to update this todo.")?;

        self.todos
            .update_scoped(
                id,
                owner_id,
                TodoChanges {
                    title: update.title,
                    content: update.content,
                    completed: update.completed,
                },
            )
            .await
    }

    async fn delete_todo(&self, id: Uuid, owner_id: Uuid) -> AppResult<Todo> {
        self.todos
            .find_scoped(id, owner_id)
            .await?
            .ok_or_not_found("Todo not found or you do not have permission to delete this todo.")?;

        self.todos.delete_scoped(id, owner_id).await
    }
}
