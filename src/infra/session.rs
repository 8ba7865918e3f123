//! Scoped database sessions.
//!
//! A [`Session`] wraps one database transaction. Everything executed
//! through it commits together on [`Session::commit`]; if the session is
//! dropped first (an early `?` return, a panic) the transaction rolls back
//! and the connection goes back to the driver.

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseTransaction, DbErr};

/// One unit of work against a single database.
pub struct Session {
    txn: DatabaseTransaction,
    database: String,
}

impl Session {
    pub(crate) fn new(txn: DatabaseTransaction, database: String) -> Self {
        Self { txn, database }
    }

    /// Connection to run statements on.
    pub fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub fn backend(&self) -> DatabaseBackend {
        self.txn.get_database_backend()
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    /// Commit all statements executed in this session.
    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await?;
        tracing::trace!(database = %self.database, "Session committed");
        Ok(())
    }

    /// Discard all statements executed in this session.
    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await?;
        tracing::debug!(database = %self.database, "Session rolled back");
        Ok(())
    }
}
