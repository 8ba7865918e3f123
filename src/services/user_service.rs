//! User service - Handles the user table.

use async_trait::async_trait;
use sea_orm::Value;

use crate::config::{COL_IS_HOME, COL_POOL_IS_SUPERVISED};
use crate::domain::{UpdateUser, User};
use crate::errors::{AppResult, StorageContext};
use crate::infra::{ConnectionProvider, KeyedTable, TableLocation};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
///
/// Lookups return `None` when no row matches; only storage problems fail.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Insert a new user with no device and both flags off
    async fn create_user(&self, username: &str) -> AppResult<User>;

    /// Insert a new user with no device and the given initial flags
    async fn create_user_with_flags(
        &self,
        username: &str,
        initial: UpdateUser,
    ) -> AppResult<User>;

    /// Get user by username
    async fn get_user(&self, username: &str) -> AppResult<Option<User>>;

    /// Check whether a user row exists
    async fn user_exists(&self, username: &str) -> AppResult<bool>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Update status flags; `None` when the user does not exist
    async fn update_user(&self, username: &str, changes: UpdateUser) -> AppResult<Option<User>>;

    /// Delete a user (no-op when absent)
    async fn delete_user(&self, username: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService over one user table.
pub struct UserManager {
    provider: ConnectionProvider,
    users: KeyedTable<User>,
}

impl UserManager {
    /// Create a user service for `database.table`.
    pub fn new(provider: ConnectionProvider, database: &str, table: &str) -> AppResult<Self> {
        let users = KeyedTable::new(&provider, TableLocation::new(database, table))?;
        Ok(Self { provider, users })
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, username: &str) -> AppResult<User> {
        self.create_user_with_flags(username, UpdateUser::default()).await
    }

    async fn create_user_with_flags(
        &self,
        username: &str,
        initial: UpdateUser,
    ) -> AppResult<User> {
        const CONTEXT: &str = "creating user error";

        let user = User::new(username).with_changes(&initial);
        let session = self.provider.session().await.context(CONTEXT)?;
        self.users.insert(&session, &user).await.context(CONTEXT)?;
        session.commit().await.context(CONTEXT)?;

        tracing::info!(username = %username, table = %self.users.location(), "User created");
        Ok(user)
    }

    async fn get_user(&self, username: &str) -> AppResult<Option<User>> {
        const CONTEXT: &str = "getuser error";

        let session = self.provider.session().await.context(CONTEXT)?;
        let user = self
            .users
            .find(&session, username.to_string())
            .await
            .context(CONTEXT)?;
        session.commit().await.context(CONTEXT)?;
        Ok(user)
    }

    async fn user_exists(&self, username: &str) -> AppResult<bool> {
        Ok(self.get_user(username).await?.is_some())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        const CONTEXT: &str = "listing users error";

        let session = self.provider.session().await.context(CONTEXT)?;
        let users = self.users.list(&session).await.context(CONTEXT)?;
        session.commit().await.context(CONTEXT)?;
        Ok(users)
    }

    async fn update_user(&self, username: &str, changes: UpdateUser) -> AppResult<Option<User>> {
        const CONTEXT: &str = "updating user error";

        let mut columns: Vec<(&'static str, Value)> = Vec::new();
        if let Some(is_home) = changes.is_home {
            columns.push((COL_IS_HOME, is_home.into()));
        }
        if let Some(supervised) = changes.pool_is_supervised {
            columns.push((COL_POOL_IS_SUPERVISED, supervised.into()));
        }

        let session = self.provider.session().await.context(CONTEXT)?;
        if !columns.is_empty() {
            let updated = self
                .users
                .update(&session, username.to_string(), columns)
                .await
                .context(CONTEXT)?;
            if updated == 0 {
                return Ok(None);
            }
        }
        let user = self
            .users
            .find(&session, username.to_string())
            .await
            .context(CONTEXT)?;
        session.commit().await.context(CONTEXT)?;

        Ok(user)
    }

    async fn delete_user(&self, username: &str) -> AppResult<()> {
        const CONTEXT: &str = "deleting user error";

        let session = self.provider.session().await.context(CONTEXT)?;
        let removed = self
            .users
            .delete(&session, username.to_string())
            .await
            .context(CONTEXT)?;
        session.commit().await.context(CONTEXT)?;

        tracing::info!(username = %username, removed, "User delete processed");
        Ok(())
    }
}
