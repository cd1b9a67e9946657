//! Todo domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Todo domain entity. `owner_id` is bound at creation time to the acting
/// identity and never taken from client input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub completed: bool,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Todo response returned to the client
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TodoResponse {
    /// Unique todo identifier
    #[schema(example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    pub id: Uuid,
    /// Todo title
    #[schema(example = "Buy milk")]
    pub title: String,
    /// Optional longer description
    #[schema(example = "Two liters, whole")]
    pub content: Option<String>,
    /// Completion flag
    pub completed: bool,
    /// Owning user id
    pub owner_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            content: todo.content,
            completed: todo.completed,
            owner_id: todo.owner_id,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}
