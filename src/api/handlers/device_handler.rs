//! Device handlers.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{parse_device_id, Device, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::{Created, NoContent};

/// `?deviceID=` selector, kept as text so malformed ids reach the service
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeviceQuery {
    /// Numeric device identifier
    #[serde(rename = "deviceID")]
    pub device_id: Option<String>,
}

/// Onboard a device for an existing user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OnboardDeviceRequest {
    #[serde(rename = "deviceID")]
    #[schema(example = 1001)]
    pub device_id: i64,
    #[validate(length(min = 1, max = 64, message = "must be 1 to 64 characters"))]
    #[schema(example = "alice")]
    pub username: String,
}

/// Create device routes
pub fn device_routes() -> Router<AppState> {
    Router::new().route(
        "/device",
        get(get_device).post(onboard_device).delete(remove_device),
    )
}

/// Get one device, or the users of the device table when no id is given
#[utoipa::path(
    get,
    path = "/device",
    tag = "Devices",
    params(DeviceQuery),
    responses(
        (status = 200, description = "The device; all users of the device table without `deviceID`", body = Device),
        (status = 400, description = "Malformed device id"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn get_device(
    State(state): State<AppState>,
    Query(query): Query<DeviceQuery>,
) -> AppResult<Response> {
    match query.device_id {
        Some(device_id) => {
            let device = state
                .device_service
                .get_device(&device_id)
                .await?
                .ok_or_not_found()?;
            Ok(Json(device).into_response())
        }
        None => {
            let users: Vec<User> = state.device_service.get_all_users().await?;
            Ok(Json(users).into_response())
        }
    }
}

/// Onboard a device
#[utoipa::path(
    post,
    path = "/device",
    tag = "Devices",
    request_body = OnboardDeviceRequest,
    responses(
        (status = 201, description = "Device onboarded", body = Device),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn onboard_device(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<OnboardDeviceRequest>,
) -> AppResult<Created<Device>> {
    if !state.user_service.user_exists(&payload.username).await? {
        return Err(AppError::NotFound);
    }

    let device = Device::new(payload.device_id, payload.username);
    state.device_service.onboard_device(device.clone()).await?;

    Ok(Created(device))
}

/// Remove a device
#[utoipa::path(
    delete,
    path = "/device",
    tag = "Devices",
    params(DeviceQuery),
    responses(
        (status = 204, description = "Device removed (or did not exist)"),
        (status = 400, description = "Missing or malformed device id")
    )
)]
pub async fn remove_device(
    State(state): State<AppState>,
    Query(query): Query<DeviceQuery>,
) -> AppResult<NoContent> {
    let raw = query
        .device_id
        .ok_or_else(|| AppError::bad_request("deviceID query parameter is required"))?;
    let device_id = parse_device_id(&raw)?;

    state.device_service.remove_device(device_id).await?;
    Ok(NoContent)
}
