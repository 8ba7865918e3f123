//! Serve command - Starts the API servers and the documentation server.
//!
//! Production and test environments run side by side, each on its own
//! port with its own connection provider and tables. Any server failing
//! stops the command.

use axum::Router;
use futures::future::try_join_all;

use crate::api::{create_router, docs_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, EnvironmentConfig};
use crate::errors::{AppError, AppResult};
use crate::infra::{create_tables, ConnectionProvider};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    let config = apply_overrides(config, &args);
    tracing::info!("Starting servers...");

    let mut environments = vec![config.production.clone()];
    if !args.no_test_server {
        environments.push(config.test.clone());
    }

    let mut servers = Vec::with_capacity(environments.len() + 1);
    for environment in environments {
        let router = environment_router(&environment, args.create_tables).await?;
        servers.push(run_server(
            environment.name,
            config.addr(environment.port),
            router,
        ));
    }
    servers.push(run_server("docs", config.addr(config.docs_port), docs_router()));

    try_join_all(servers).await?;
    Ok(())
}

/// Command-line flags win over environment configuration.
fn apply_overrides(mut config: Config, args: &ServeArgs) -> Config {
    if let Some(host) = &args.host {
        config.server_host = host.clone();
    }
    if let Some(port) = args.port {
        config.production.port = port;
    }
    if let Some(port) = args.test_port {
        config.test.port = port;
    }
    if let Some(port) = args.docs_port {
        config.docs_port = port;
    }
    config
}

async fn environment_router(
    environment: &EnvironmentConfig,
    create_missing_tables: bool,
) -> AppResult<Router> {
    let provider = ConnectionProvider::connect(&environment.database).await?;

    if create_missing_tables {
        create_tables(&provider, &environment.tables).await?;
    }

    let state = AppState::from_provider(environment.name, provider, &environment.tables)?;
    Ok(create_router(state))
}

async fn run_server(name: &'static str, addr: String, app: Router) -> AppResult<()> {
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {} server to {}: {}", name, addr, e)))?;

    tracing::info!(server = name, "Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("{} server error: {}", name, e)))
}
