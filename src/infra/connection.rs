//! Connection provider.
//!
//! One provider per environment. It knows which database it points at and
//! hands out [`Session`]s, each scoped to a single unit of work.

use sea_orm::{
    ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
    TransactionTrait,
};

use super::session::Session;
use crate::config::DatabaseSettings;
use crate::errors::{AppResult, StorageContext};

/// Supplies scoped sessions against one database.
#[derive(Clone)]
pub struct ConnectionProvider {
    connection: DatabaseConnection,
    database: String,
}

impl std::fmt::Debug for ConnectionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProvider")
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl ConnectionProvider {
    /// Connect using the given credentials and target database.
    pub async fn connect(settings: &DatabaseSettings) -> AppResult<Self> {
        let connection = SeaDatabase::connect(settings.connection_url()?)
            .await
            .context("connection error")?;
        tracing::info!(database = %settings.database, "Database connected");

        Ok(Self {
            connection,
            database: settings.database.clone(),
        })
    }

    /// Wrap an already established connection.
    pub fn from_connection(connection: DatabaseConnection, database: impl Into<String>) -> Self {
        Self {
            connection,
            database: database.into(),
        }
    }

    /// Name of the database this provider targets.
    pub fn database_name(&self) -> &str {
        &self.database
    }

    /// Open a session for one unit of work.
    ///
    /// The session must be committed to keep its writes; dropping it on any
    /// other path rolls back and returns the connection.
    pub async fn session(&self) -> Result<Session, DbErr> {
        let txn = self.connection.begin().await?;
        tracing::trace!(database = %self.database, "Session opened");
        Ok(Session::new(txn, self.database.clone()))
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
