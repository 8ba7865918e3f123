//! Domain layer - Core entities
//!
//! Value shapes for the rows the services own. No storage concerns live
//! here; row mapping is in `infra::repositories::records`.

pub mod device;
pub mod neighbor;
pub mod user;

pub use device::{parse_device_id, Device};
pub use neighbor::Neighbor;
pub use user::{UpdateUser, User};
