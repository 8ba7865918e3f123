//! Application services layer - Use cases over the relational store.
//!
//! Each service owns the rows of one table and talks to storage through
//! scoped sessions from a [`ConnectionProvider`](crate::infra::ConnectionProvider).
//! Handlers depend on the traits, not the managers.

pub mod container;
mod device_service;
mod neighbor_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use device_service::{DeviceManager, DeviceService};
pub use neighbor_service::{NeighborManager, NeighborService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use device_service::MockDeviceService;
#[cfg(any(test, feature = "test-utils"))]
pub use neighbor_service::MockNeighborService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
