//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP-related concerns:
//! - Request handlers for users, devices and neighbors
//! - Custom extractors
//! - Route definitions and the documentation router

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::{create_router, docs_router};
pub use state::AppState;
