//! Service Container - Centralized service access for one environment.
//!
//! Production and test environments each get their own container, built
//! from their own connection provider and table names.

use std::sync::Arc;

use super::{
    DeviceManager, DeviceService, NeighborManager, NeighborService, UserManager, UserService,
};
use crate::config::TableNames;
use crate::errors::AppResult;
use crate::infra::ConnectionProvider;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn users(&self) -> Arc<dyn UserService>;

    fn devices(&self) -> Arc<dyn DeviceService>;

    fn neighbors(&self) -> Arc<dyn NeighborService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    user_service: Arc<dyn UserService>,
    device_service: Arc<dyn DeviceService>,
    neighbor_service: Arc<dyn NeighborService>,
}

impl Services {
    pub fn new(
        user_service: Arc<dyn UserService>,
        device_service: Arc<dyn DeviceService>,
        neighbor_service: Arc<dyn NeighborService>,
    ) -> Self {
        Self {
            user_service,
            device_service,
            neighbor_service,
        }
    }

    /// Wire every service to the tables of one environment.
    pub fn from_provider(provider: &ConnectionProvider, tables: &TableNames) -> AppResult<Self> {
        let database = provider.database_name();

        let user_service = UserManager::new(provider.clone(), database, &tables.users)?;
        let device_service =
            DeviceManager::new(provider.clone(), database, &tables.devices, &tables.users)?;
        let neighbor_service =
            NeighborManager::new(provider.clone(), database, &tables.neighbors)?;

        Ok(Self::new(
            Arc::new(user_service),
            Arc::new(device_service),
            Arc::new(neighbor_service),
        ))
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn devices(&self) -> Arc<dyn DeviceService> {
        self.device_service.clone()
    }

    fn neighbors(&self) -> Arc<dyn NeighborService> {
        self.neighbor_service.clone()
    }
}
