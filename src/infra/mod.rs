//! Infrastructure layer - Relational store access
//!
//! This module handles all storage concerns:
//! - Connection provider and scoped sessions
//! - The generic keyed table and per-record row mapping
//! - Table bootstrap

pub mod connection;
pub mod repositories;
pub mod schema;
pub mod session;

pub use connection::ConnectionProvider;
pub use repositories::{FromRow, KeyedTable, TableLocation, TableRecord};
pub use schema::create_tables;
pub use session::Session;
