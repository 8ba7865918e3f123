//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing. Flags left unset
//! fall back to the environment-derived [`Config`](crate::config::Config).

use clap::{Parser, Subcommand};

/// LifeGuard - Pool safety backend
#[derive(Parser, Debug)]
#[command(name = "lifeguard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the production, test and documentation servers
    Serve(ServeArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Production API port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Test environment API port
    #[arg(long)]
    pub test_port: Option<u16>,

    /// Documentation server port
    #[arg(long)]
    pub docs_port: Option<u16>,

    /// Only run the production API (and docs)
    #[arg(long)]
    pub no_test_server: bool,

    /// Create missing tables before serving
    #[arg(long)]
    pub create_tables: bool,
}
