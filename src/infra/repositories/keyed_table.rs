//! Generic keyed CRUD over one table.
//!
//! Every service in this crate stores one record type in one table and
//! reads it back by a single key column. [`KeyedTable`] captures that
//! pattern once. The table is addressed by a [`TableLocation`] chosen at
//! construction time, so the same code serves the production schema and
//! the isolated test schema.
//!
//! Statements are built with `sea_query` so every value travels as a bound
//! parameter; only identifiers come from configuration.

use std::fmt;
use std::marker::PhantomData;

use sea_orm::sea_query::{Alias, Expr, OnConflict, Query, TableCreateStatement};
use sea_orm::{ConnectionTrait, DbErr, QueryResult, Statement, Value};

use crate::errors::{AppError, AppResult};
use crate::infra::{ConnectionProvider, Session};

/// `(databaseName, tableName)` pair identifying where a record type lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLocation {
    pub database: String,
    pub table: String,
}

impl TableLocation {
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.table)
    }
}

/// A shape that can be read from a result row.
pub trait FromRow: Sized {
    /// Columns to select, in order.
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &QueryResult) -> Result<Self, DbErr>;
}

/// A record stored one-per-row in a keyed table.
pub trait TableRecord: FromRow + Send + Sync {
    type Key: Into<Value> + Send + Sync;

    /// Column holding the unique key.
    const KEY_COLUMN: &'static str;

    /// Column/value pairs written on insert.
    fn values(&self) -> Vec<(&'static str, Value)>;

    /// `CREATE TABLE IF NOT EXISTS` statement for a table of this record.
    fn table_definition(table: &str) -> TableCreateStatement;
}

/// Keyed CRUD operations for one record type in one table.
pub struct KeyedTable<R> {
    location: TableLocation,
    _record: PhantomData<fn() -> R>,
}

impl<R> fmt::Debug for KeyedTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedTable")
            .field("location", &self.location)
            .finish()
    }
}

impl<R: TableRecord> KeyedTable<R> {
    /// Bind a record type to a table reachable through `provider`.
    ///
    /// Fails when the location names a different database than the one the
    /// provider connects to.
    pub fn new(provider: &ConnectionProvider, location: TableLocation) -> AppResult<Self> {
        if provider.database_name() != location.database {
            return Err(AppError::config(format!(
                "table {} does not belong to database '{}'",
                location,
                provider.database_name()
            )));
        }

        Ok(Self {
            location,
            _record: PhantomData,
        })
    }

    pub fn location(&self) -> &TableLocation {
        &self.location
    }

    fn table(&self) -> Alias {
        Alias::new(self.location.table.as_str())
    }

    /// Insert a new row.
    pub async fn insert(&self, session: &Session, record: &R) -> Result<u64, DbErr> {
        let (columns, values): (Vec<_>, Vec<_>) = record.values().into_iter().unzip();

        let mut insert = Query::insert();
        insert
            .into_table(self.table())
            .columns(columns.into_iter().map(Alias::new));
        insert
            .values(values.into_iter().map(Into::into))
            .map_err(|e| DbErr::Custom(e.to_string()))?;

        self.execute(session, session.backend().build(&insert)).await
    }

    /// Insert a row unless one already exists with the same `conflict_column`.
    pub async fn insert_or_ignore(
        &self,
        session: &Session,
        record: &R,
        conflict_column: &str,
    ) -> Result<u64, DbErr> {
        let (columns, values): (Vec<_>, Vec<_>) = record.values().into_iter().unzip();

        let mut insert = Query::insert();
        insert
            .into_table(self.table())
            .columns(columns.into_iter().map(Alias::new));
        insert
            .values(values.into_iter().map(Into::into))
            .map_err(|e| DbErr::Custom(e.to_string()))?;
        insert.on_conflict(
            OnConflict::column(Alias::new(conflict_column))
                .do_nothing()
                .to_owned(),
        );

        self.execute(session, session.backend().build(&insert)).await
    }

    /// Look up the row with the given key.
    pub async fn find(&self, session: &Session, key: R::Key) -> Result<Option<R>, DbErr> {
        self.find_by(session, R::KEY_COLUMN, key.into()).await
    }

    /// Look up the first row whose `column` equals `value`.
    pub async fn find_by(
        &self,
        session: &Session,
        column: &str,
        value: Value,
    ) -> Result<Option<R>, DbErr> {
        let select = Query::select()
            .columns(R::COLUMNS.iter().map(|c| Alias::new(*c)))
            .from(self.table())
            .and_where(Expr::col(Alias::new(column)).eq(value))
            .to_owned();

        let stmt = session.backend().build(&select);
        self.check_session(session)?;
        tracing::debug!(table = %self.location, sql = %stmt.sql, "Query one");

        session
            .conn()
            .query_one(stmt)
            .await?
            .map(|row| R::from_row(&row))
            .transpose()
    }

    /// Every row of the table.
    pub async fn list(&self, session: &Session) -> Result<Vec<R>, DbErr> {
        self.scan::<R>(session).await
    }

    /// Every row of the table, projected into `T`.
    ///
    /// Rows come back in storage order, which is not guaranteed stable.
    pub async fn scan<T: FromRow>(&self, session: &Session) -> Result<Vec<T>, DbErr> {
        let select = Query::select()
            .columns(T::COLUMNS.iter().map(|c| Alias::new(*c)))
            .from(self.table())
            .to_owned();

        let stmt = session.backend().build(&select);
        self.check_session(session)?;
        tracing::debug!(table = %self.location, sql = %stmt.sql, "Query all");

        session
            .conn()
            .query_all(stmt)
            .await?
            .iter()
            .map(T::from_row)
            .collect()
    }

    /// Update columns of the row with the given key.
    pub async fn update(
        &self,
        session: &Session,
        key: R::Key,
        changes: Vec<(&'static str, Value)>,
    ) -> Result<u64, DbErr> {
        self.update_by(session, R::KEY_COLUMN, key.into(), changes)
            .await
    }

    /// Update columns of every row whose `column` equals `value`.
    pub async fn update_by(
        &self,
        session: &Session,
        column: &str,
        value: Value,
        changes: Vec<(&'static str, Value)>,
    ) -> Result<u64, DbErr> {
        if changes.is_empty() {
            return Err(DbErr::Custom(format!(
                "update on {} without any column to set",
                self.location
            )));
        }

        let update = Query::update()
            .table(self.table())
            .values(
                changes
                    .into_iter()
                    .map(|(col, val)| (Alias::new(col), val.into())),
            )
            .and_where(Expr::col(Alias::new(column)).eq(value))
            .to_owned();

        self.execute(session, session.backend().build(&update)).await
    }

    /// Delete the row with the given key. Deleting a missing row is not an error.
    pub async fn delete(&self, session: &Session, key: R::Key) -> Result<u64, DbErr> {
        self.delete_by(session, R::KEY_COLUMN, key.into()).await
    }

    /// Delete every row whose `column` equals `value`.
    pub async fn delete_by(
        &self,
        session: &Session,
        column: &str,
        value: Value,
    ) -> Result<u64, DbErr> {
        let delete = Query::delete()
            .from_table(self.table())
            .and_where(Expr::col(Alias::new(column)).eq(value))
            .to_owned();

        self.execute(session, session.backend().build(&delete)).await
    }

    /// Create the table if it does not exist yet.
    pub async fn create_if_missing(&self, session: &Session) -> Result<(), DbErr> {
        let create = R::table_definition(&self.location.table);
        self.execute(session, session.backend().build(&create))
            .await?;
        tracing::info!(table = %self.location, "Table ready");
        Ok(())
    }

    async fn execute(&self, session: &Session, stmt: Statement) -> Result<u64, DbErr> {
        self.check_session(session)?;
        tracing::debug!(table = %self.location, sql = %stmt.sql, "Execute");

        let result = session.conn().execute(stmt).await?;
        Ok(result.rows_affected())
    }

    fn check_session(&self, session: &Session) -> Result<(), DbErr> {
        if session.database_name() != self.location.database {
            return Err(DbErr::Custom(format!(
                "session for '{}' used on table {}",
                session.database_name(),
                self.location
            )));
        }
        Ok(())
    }
}
