//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A pool owner tracked by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique username
    #[schema(example = "alice")]
    pub username: String,
    /// Onboarded device, if any
    #[serde(rename = "deviceID")]
    #[schema(example = 1001)]
    pub device_id: Option<i64>,
    /// Whether the user is currently at home
    #[serde(rename = "isHome")]
    pub is_home: bool,
    /// Whether someone is supervising the pool
    #[serde(rename = "poolIsSupervised")]
    pub pool_is_supervised: bool,
}

impl User {
    /// A freshly created user: no device, both flags off.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            device_id: None,
            is_home: false,
            pool_is_supervised: false,
        }
    }

    /// Apply the given flag changes; absent fields keep their value.
    pub fn with_changes(mut self, changes: &UpdateUser) -> Self {
        if let Some(is_home) = changes.is_home {
            self.is_home = is_home;
        }
        if let Some(supervised) = changes.pool_is_supervised {
            self.pool_is_supervised = supervised;
        }
        self
    }
}

/// Partial update of a user's status flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UpdateUser {
    #[serde(rename = "isHome")]
    pub is_home: Option<bool>,
    #[serde(rename = "poolIsSupervised")]
    pub pool_is_supervised: Option<bool>,
}

impl UpdateUser {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.is_home.is_none() && self.pool_is_supervised.is_none()
    }
}
