//! LifeGuard - Pool safety backend
//!
//! Tracks pool owners, the monitoring device paired with each of them and
//! the neighbors who can check on a pool. Every environment (production,
//! test) gets its own database, tables and HTTP server; API documentation
//! is served separately.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, devices and neighbors
//! - **services**: Per-table use cases behind traits
//! - **infra**: Connection provider, scoped sessions, keyed tables
//! - **api**: HTTP handlers, routes and OpenAPI document
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start production (1026), test (1027) and docs (1028) servers
//! cargo run -- serve
//!
//! # Create missing tables first, production only
//! cargo run -- serve --create-tables --no-test-server
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Device, Neighbor, User};
pub use errors::{AppError, AppResult};
