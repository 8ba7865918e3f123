//! Shared fixtures: an in-memory SQLite store with the test-environment tables.

#![allow(dead_code)]

use lifeguard::config::{TableNames, DEFAULT_TEST_DATABASE};
use lifeguard::infra::{create_tables, ConnectionProvider};
use sea_orm::{ConnectOptions, Database};

/// Provider over a private in-memory database named like the test database.
pub async fn memory_provider() -> ConnectionProvider {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // A second pooled connection would see a different, empty database.
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let connection = Database::connect(options)
        .await
        .expect("in-memory sqlite should open");
    let provider = ConnectionProvider::from_connection(connection, DEFAULT_TEST_DATABASE);

    create_tables(&provider, &TableNames::test())
        .await
        .expect("tables should be created");
    provider
}

pub fn tables() -> TableNames {
    TableNames::test()
}
