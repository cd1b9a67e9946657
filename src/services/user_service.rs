//! User service - profile use cases for the account owner.
//!
//! Every operation takes the acting identity explicitly and enforces the
//! self-only rule before touching the store.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{credentials, Password, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{UserChanges, UserRepository};

/// Optional profile fields accepted by [`UserService::update_profile`].
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Fetch a profile; only the owner may read it
    async fn get_profile(&self, id: Uuid, current_user_id: Uuid) -> AppResult<User>;

    /// Update email/name/password; fields validated as at registration
    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
        current_user_id: Uuid,
    ) -> AppResult<User>;

    /// Change password after verifying the current one
    async fn change_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
        current_user_id: Uuid,
    ) -> AppResult<()>;

    /// Change email after verifying the current password
    async fn change_email(
        &self,
        id: Uuid,
        new_email: &str,
        current_password: &str,
        current_user_id: Uuid,
    ) -> AppResult<User>;

    /// Delete the account; owned todos cascade at the store level
    async fn delete_account(&self, id: Uuid, current_user_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    fn require_self(id: Uuid, current_user_id: Uuid, action: &str) -> AppResult<()> {
        if id != current_user_id {
            return Err(AppError::authentication(format!(
                "You can only {} your own profile.",
                action
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_profile(&self, id: Uuid, current_user_id: Uuid) -> AppResult<User> {
        Self::require_self(id, current_user_id, "view")?;

        self.users
            .find_by_id(id)
            .await?
            .ok_or_not_found("User not found.")
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
        current_user_id: Uuid,
    ) -> AppResult<User> {
        Self::require_self(id, current_user_id, "update")?;

        let mut changes = UserChanges::default();

        if let Some(email) = update.email {
            credentials::validate_email(&email)?;
            let email = credentials::normalize_email(&email);

            // Uniqueness re-check excludes the caller's own row
            if let Some(existing) = self.users.find_by_email(&email).await? {
                if existing.id != id {
                    return Err(AppError::validation(
                        "A user with this email already exists.",
                    ));
                }
            }
            changes.email = Some(email);
        }

        if let Some(name) = update.name {
            changes.name = Some(credentials::validate_name(&name)?);
        }

        if let Some(password) = update.password {
            changes.password_hash = Some(Password::new(&password)?.into_string());
        }

        self.users
            .update(id, changes)
            .await?
            .ok_or_not_found("User not found.")
    }

    async fn change_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
        current_user_id: Uuid,
    ) -> AppResult<()> {
        Self::require_self(id, current_user_id, "update")?;

        // Validate the replacement before doing any store work
        let password_hash = Password::new(new_password)?.into_string();

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_not_found("User not found.")?;

        // A stolen token alone must not be enough to rotate the password
        if !Password::from_hash(user.password_hash).verify(current_password) {
            return Err(AppError::authentication("Current password is incorrect."));
        }

        self.users
            .update(
                id,
                UserChanges {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_not_found("User not found.")?;

        Ok(())
    }

    async fn change_email(
        &self,
        id: Uuid,
        new_email: &str,
        current_password: &str,
        current_user_id: Uuid,
    ) -> AppResult<User> {
        Self::require_self(id, current_user_id, "update")?;

        credentials::validate_email(new_email)?;
        let new_email = credentials::normalize_email(new_email);

        if self.users.find_by_email(&new_email).await?.is_some() {
            return Err(AppError::validation(
                "A user with this email already exists.",
            ));
        }

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_not_found("User not found.")?;

        if !Password::from_hash(user.password_hash).verify(current_password) {
            return Err(AppError::authentication("Current password is incorrect."));
        }

        self.users
            .update(
                id,
                UserChanges {
                    email: Some(new_email),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_not_found("User not found.")
    }

    async fn delete_account(&self, id: Uuid, current_user_id: Uuid) -> AppResult<()> {
        Self::require_self(id, current_user_id, "delete")?;

        self.users
            .find_by_id(id)
            .await?
            .ok_or_not_found("User not found.")?;

        self.users
            .delete(id)
            .await?
            .ok_or_not_found("User not found.")?;

        Ok(())
    }
}
