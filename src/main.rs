//! LifeGuard - Application entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lifeguard::{
    cli::{Cli, Commands},
    commands,
    config::Config,
    AppError,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_env();
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

/// Log a failed command by category and map it to its exit status.
fn report(error: &AppError) -> ExitCode {
    match error {
        AppError::Config(_) => {
            tracing::error!(code = error.code(), "{}", error)
        }
        AppError::Storage { context, source } => {
            tracing::error!(code = error.code(), context = %context, "Database unavailable: {}", source)
        }
        _ => tracing::error!(code = error.code(), "Command failed: {}", error),
    }

    ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(1))
}

/// `--verbose` forces debug; otherwise `RUST_LOG`, defaulting to info.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}
