//! Repository layer - Data access abstraction
//!
//! A single generic keyed table plus the row mapping for each record.

mod keyed_table;
mod records;

pub use keyed_table::{FromRow, KeyedTable, TableLocation, TableRecord};
