//! HTTP request handlers.

pub mod device_handler;
pub mod neighbor_handler;
pub mod user_handler;

pub use device_handler::device_routes;
pub use neighbor_handler::neighbor_routes;
pub use user_handler::user_routes;
