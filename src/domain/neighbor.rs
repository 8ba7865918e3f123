//! Neighbor domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Someone who can check on a user's pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Neighbor {
    /// The neighbor's own username
    #[schema(example = "dave")]
    pub username: String,
    /// Username of the user whose pool this neighbor watches
    #[serde(rename = "neighborOf")]
    #[schema(example = "alice")]
    pub neighbor_of: String,
}

impl Neighbor {
    pub fn new(username: impl Into<String>, neighbor_of: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            neighbor_of: neighbor_of.into(),
        }
    }
}
