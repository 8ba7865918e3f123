//! Row mapping and table layout for each domain record.

use sea_orm::sea_query::{Alias, ColumnDef, Table, TableCreateStatement};
use sea_orm::{DbErr, QueryResult, Value};

use super::keyed_table::{FromRow, TableRecord};
use crate::config::{
    COL_DEVICE_ID, COL_IS_HOME, COL_NEIGHBOR_OF, COL_POOL_IS_SUPERVISED, COL_USERNAME,
};
use crate::domain::{Device, Neighbor, User};

// User rows come from the user table and, projected, from the device table.
// Flags may be NULL in the latter and read as false.
impl FromRow for User {
    const COLUMNS: &'static [&'static str] = &[
        COL_USERNAME,
        COL_DEVICE_ID,
        COL_IS_HOME,
        COL_POOL_IS_SUPERVISED,
    ];

    fn from_row(row: &QueryResult) -> Result<Self, DbErr> {
        Ok(User {
            username: row.try_get("", COL_USERNAME)?,
            device_id: row.try_get("", COL_DEVICE_ID)?,
            is_home: row
                .try_get::<Option<bool>>("", COL_IS_HOME)?
                .unwrap_or(false),
            pool_is_supervised: row
                .try_get::<Option<bool>>("", COL_POOL_IS_SUPERVISED)?
                .unwrap_or(false),
        })
    }
}

impl TableRecord for User {
    type Key = String;

    const KEY_COLUMN: &'static str = COL_USERNAME;

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            (COL_USERNAME, self.username.clone().into()),
            (COL_DEVICE_ID, self.device_id.into()),
            (COL_IS_HOME, self.is_home.into()),
            (COL_POOL_IS_SUPERVISED, self.pool_is_supervised.into()),
        ]
    }

    fn table_definition(table: &str) -> TableCreateStatement {
        Table::create()
            .table(Alias::new(table))
            .if_not_exists()
            .col(
                ColumnDef::new(Alias::new(COL_USERNAME))
                    .string()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(Alias::new(COL_DEVICE_ID)).big_integer().null())
            .col(
                ColumnDef::new(Alias::new(COL_IS_HOME))
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new(Alias::new(COL_POOL_IS_SUPERVISED))
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .to_owned()
    }
}

impl FromRow for Device {
    const COLUMNS: &'static [&'static str] = &[COL_DEVICE_ID, COL_USERNAME];

    fn from_row(row: &QueryResult) -> Result<Self, DbErr> {
        Ok(Device {
            device_id: row.try_get("", COL_DEVICE_ID)?,
            username: row.try_get("", COL_USERNAME)?,
        })
    }
}

impl TableRecord for Device {
    type Key = i64;

    const KEY_COLUMN: &'static str = COL_DEVICE_ID;

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            (COL_USERNAME, self.username.clone().into()),
            (COL_DEVICE_ID, self.device_id.into()),
        ]
    }

    // One device per username; the status flags are carried for the
    // user projection of the device table.
    fn table_definition(table: &str) -> TableCreateStatement {
        Table::create()
            .table(Alias::new(table))
            .if_not_exists()
            .col(
                ColumnDef::new(Alias::new(COL_DEVICE_ID))
                    .big_integer()
                    .not_null()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(Alias::new(COL_USERNAME))
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Alias::new(COL_IS_HOME)).boolean().null())
            .col(
                ColumnDef::new(Alias::new(COL_POOL_IS_SUPERVISED))
                    .boolean()
                    .null(),
            )
            .to_owned()
    }
}

impl FromRow for Neighbor {
    const COLUMNS: &'static [&'static str] = &[COL_USERNAME, COL_NEIGHBOR_OF];

    fn from_row(row: &QueryResult) -> Result<Self, DbErr> {
        Ok(Neighbor {
            username: row.try_get("", COL_USERNAME)?,
            neighbor_of: row.try_get("", COL_NEIGHBOR_OF)?,
        })
    }
}

impl TableRecord for Neighbor {
    type Key = String;

    const KEY_COLUMN: &'static str = COL_USERNAME;

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            (COL_USERNAME, self.username.clone().into()),
            (COL_NEIGHBOR_OF, self.neighbor_of.clone().into()),
        ]
    }

    fn table_definition(table: &str) -> TableCreateStatement {
        Table::create()
            .table(Alias::new(table))
            .if_not_exists()
            .col(
                ColumnDef::new(Alias::new(COL_USERNAME))
                    .string()
                    .not_null()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(Alias::new(COL_NEIGHBOR_OF))
                    .string()
                    .not_null(),
            )
            .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DatabaseBackend;

    #[test]
    fn user_table_definition_targets_given_table() {
        let sql = DatabaseBackend::Postgres
            .build(&User::table_definition("testlifeguardusers"))
            .to_string();
        assert!(sql.contains("\"testlifeguardusers\""));
        assert!(sql.contains("\"poolissupervised\""));
        assert!(sql.contains("IF NOT EXISTS"));
    }

    #[test]
    fn device_values_bind_username_and_id() {
        let values = Device::new(1001, "alice").values();
        let columns: Vec<_> = values.iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, vec![COL_USERNAME, COL_DEVICE_ID]);
        assert_eq!(values[1].1, Value::from(1001i64));
    }
}
