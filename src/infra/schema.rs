//! Table bootstrap for one environment.
//!
//! Creates any missing table with `CREATE TABLE IF NOT EXISTS`; existing
//! tables are left untouched.

use crate::config::TableNames;
use crate::domain::{Device, Neighbor, User};
use crate::errors::{AppResult, StorageContext};

use super::{ConnectionProvider, KeyedTable, TableLocation};

/// Create the user, device and neighbor tables if they are missing.
pub async fn create_tables(provider: &ConnectionProvider, tables: &TableNames) -> AppResult<()> {
    let database = provider.database_name().to_string();

    let users = KeyedTable::<User>::new(provider, TableLocation::new(&database, &tables.users))?;
    let devices =
        KeyedTable::<Device>::new(provider, TableLocation::new(&database, &tables.devices))?;
    let neighbors =
        KeyedTable::<Neighbor>::new(provider, TableLocation::new(&database, &tables.neighbors))?;

    let session = provider.session().await.context("connection error")?;
    users
        .create_if_missing(&session)
        .await
        .context("create table error")?;
    devices
        .create_if_missing(&session)
        .await
        .context("create table error")?;
    neighbors
        .create_if_missing(&session)
        .await
        .context("create table error")?;
    session.commit().await.context("create table error")?;

    Ok(())
}
