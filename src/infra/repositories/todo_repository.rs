//! Todo repository - scoped store capability for the ownership use cases.
//!
//! Every read-by-id and mutation is parameterized by `(id, owner_id)`, so
//! the query itself cannot touch another owner's row.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::todo::{self, ActiveModel, Entity as TodoEntity};
use crate::domain::Todo;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Field changes applied by [`TodoRepository::update_scoped`]. `None`
/// leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub completed: Option<bool>,
}

/// Todo repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Create a new todo owned by `owner_id`
    async fn create(
        &self,
        owner_id: Uuid,
        title: String,
        content: Option<String>,
        completed: bool,
    ) -> AppResult<Todo>;

    /// All todos for one owner, newest first by creation time
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Todo>>;

    /// Find one todo scoped by (id, owner); `None` covers both "absent"
    /// and "not yours"
    async fn find_scoped(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Todo>>;

    /// Apply field changes to a scoped todo; errors if no scoped row matches
    async fn update_scoped(&self, id: Uuid, owner_id: Uuid, changes: TodoChanges)
        -> AppResult<Todo>;

    /// Delete a scoped todo, returning it; errors if no scoped row matches
    async fn delete_scoped(&self, id: Uuid, owner_id: Uuid) -> AppResult<Todo>;
}

/// Concrete implementation of TodoRepository backed by SeaORM
pub struct TodoStore {
    db: DatabaseConnection,
}

impl TodoStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_scoped_model(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<todo::Model>> {
        TodoEntity::find_by_id(id)
            .filter(todo::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)
    }
}

#[async_trait]
impl TodoRepository for TodoStore {
    async fn create(
        &self,
        owner_id: Uuid,
        title: String,
        content: Option<String>,
        completed: bool,
    ) -> AppResult<Todo> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title),
            content: Set(content),
            completed: Set(completed),
            owner_id: Set(owner_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Todo::from(model))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Todo>> {
        let models = TodoEntity::find()
            .filter(todo::Column::OwnerId.eq(owner_id))
            .order_by_desc(todo::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Todo::from).collect())
    }

    async fn find_scoped(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Todo>> {
        Ok(self.find_scoped_model(id, owner_id).await?.map(Todo::from))
    }

    async fn update_scoped(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: TodoChanges,
    ) -> AppResult<Todo> {
        let model = self
            .find_scoped_model(id, owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Todo not found."))?;

        let mut active: ActiveModel = model.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(content) = changes.content {
            active.content = Set(Some(content));
        }
        if let Some(completed) = changes.completed {
            active.completed = Set(completed);
        }
        active.updated_at = Set(chrono::Utc::now());

        // A concurrent delete between the scoped fetch and this write
        // surfaces here instead of being swallowed.
        match active.update(&self.db).await {
            Ok(model) => Ok(Todo::from(model)),
            Err(DbErr::RecordNotUpdated) => Err(AppError::not_found("Todo not found.")),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_scoped(&self, id: Uuid, owner_id: Uuid) -> AppResult<Todo> {
        let model = self
            .find_scoped_model(id, owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Todo not found."))?;
        let deleted = Todo::from(model);

        let result = TodoEntity::delete_many()
            .filter(todo::Column::Id.eq(id))
            .filter(todo::Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("Todo not found."));
        }

        Ok(deleted)
    }
}
