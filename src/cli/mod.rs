//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the API and documentation servers

pub mod args;

pub use args::{Cli, Commands};
