//! OpenAPI documentation configuration.
//!
//! Served by the documentation server, separate from the API servers.

use utoipa::OpenApi;

use crate::api::handlers::{device_handler, neighbor_handler, user_handler};
use crate::domain::{Device, Neighbor, User};

/// OpenAPI documentation for the LifeGuard backend
#[derive(OpenApi)]
#[openapi(
    info(
        title = "LifeGuard API",
        version = "0.1.0",
        description = "Pool safety backend: users, their monitoring devices and the neighbors who watch their pools"
    ),
    servers(
        (url = "http://localhost:1026", description = "Production environment"),
        (url = "http://localhost:1027", description = "Test environment")
    ),
    paths(
        user_handler::get_user,
        user_handler::upsert_user,
        user_handler::delete_user,
        device_handler::get_device,
        device_handler::onboard_device,
        device_handler::remove_device,
        neighbor_handler::get_neighbor,
        neighbor_handler::add_neighbor,
        neighbor_handler::remove_neighbor,
    ),
    components(
        schemas(
            User,
            Device,
            Neighbor,
            user_handler::UpsertUserRequest,
            device_handler::OnboardDeviceRequest,
            neighbor_handler::AddNeighborRequest,
        )
    ),
    tags(
        (name = "Users", description = "Pool owners and their status flags"),
        (name = "Devices", description = "Device onboarding and lookup"),
        (name = "Neighbors", description = "Neighbors watching a user's pool")
    )
)]
pub struct ApiDoc;
