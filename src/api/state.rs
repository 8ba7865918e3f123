//! Application state - Dependency injection container.
//!
//! One `AppState` per environment server; production and test never share
//! services or connections.

use std::sync::Arc;

use crate::config::TableNames;
use crate::errors::AppResult;
use crate::infra::ConnectionProvider;
use crate::services::{DeviceService, NeighborService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Environment label, `production` or `test`
    pub environment: &'static str,
    pub user_service: Arc<dyn UserService>,
    pub device_service: Arc<dyn DeviceService>,
    pub neighbor_service: Arc<dyn NeighborService>,
    /// Connection provider, used for health checks
    pub database: ConnectionProvider,
}

impl AppState {
    /// Build state for one environment from its provider and table names.
    pub fn from_provider(
        environment: &'static str,
        database: ConnectionProvider,
        tables: &TableNames,
    ) -> AppResult<Self> {
        let services = Services::from_provider(&database, tables)?;
        Ok(Self::new(environment, &services, database))
    }

    /// Create state from an existing service container.
    pub fn new(
        environment: &'static str,
        services: &dyn ServiceContainer,
        database: ConnectionProvider,
    ) -> Self {
        Self {
            environment,
            user_service: services.users(),
            device_service: services.devices(),
            neighbor_service: services.neighbors(),
            database,
        }
    }
}
