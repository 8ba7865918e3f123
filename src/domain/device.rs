//! Device domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

/// A pool monitoring device registered to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Device {
    #[serde(rename = "deviceID")]
    #[schema(example = 1001)]
    pub device_id: i64,
    #[schema(example = "alice")]
    pub username: String,
}

impl Device {
    pub fn new(device_id: i64, username: impl Into<String>) -> Self {
        Self {
            device_id,
            username: username.into(),
        }
    }
}

/// Parse a device identifier received as text.
pub fn parse_device_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::malformed(format!("deviceID '{}' is not an integer", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids() {
        assert_eq!(parse_device_id("1001").unwrap(), 1001);
        assert_eq!(parse_device_id("-7").unwrap(), -7);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        for raw in ["abc", "", "12a", " 12", "1.5"] {
            assert!(
                matches!(parse_device_id(raw), Err(AppError::MalformedInput(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_value(Device::new(42, "alice")).unwrap();
        assert_eq!(json, serde_json::json!({"deviceID": 42, "username": "alice"}));
    }
}
