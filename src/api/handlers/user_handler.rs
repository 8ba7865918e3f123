//! User handlers.

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
use crate::domain::{UpdateUser, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::{Created, NoContent};

/// `?username=` selector; absent means "all users" on GET
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Username to look up
    pub username: Option<String>,
}

/// Create a user, or update the flags of an existing one
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertUserRequest {
    #[validate(length(min = 1, max = 64, message = "must be 1 to 64 characters"))]
    #[schema(example = "alice")]
    pub username: String,
    #[serde(rename = "isHome")]
    pub is_home: Option<bool>,
    #[serde(rename = "poolIsSupervised")]
    pub pool_is_supervised: Option<bool>,
}

impl UpsertUserRequest {
    fn changes(&self) -> UpdateUser {
        UpdateUser {
            is_home: self.is_home,
            pool_is_supervised: self.pool_is_supervised,
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user", get(get_user).post(upsert_user).delete(delete_user))
}

/// Get one user, or every user when no username is given
#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    params(UserQuery),
    responses(
        (status = 200, description = "The user, or all users without `username`", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Response> {
    match query.username {
        Some(username) => {
            let user = state.user_service.get_user(&username).await?.ok_or_not_found()?;
            Ok(Json(user).into_response())
        }
        None => {
            let users = state.user_service.list_users().await?;
            Ok(Json(users).into_response())
        }
    }
}

/// Create a user or update its status flags
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = UpsertUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 200, description = "Existing user updated", body = User),
        (status = 400, description = "Validation error")
    )
)]
pub async fn upsert_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpsertUserRequest>,
) -> AppResult<Response> {
    let changes = payload.changes();

    if state.user_service.user_exists(&payload.username).await? {
        let user = state
            .user_service
            .update_user(&payload.username, changes)
            .await?
            .ok_or_not_found()?;
        return Ok(Json(user).into_response());
    }

    let user = state
        .user_service
        .create_user_with_flags(&payload.username, changes)
        .await?;

    Ok(Created(user).into_response())
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/user",
    tag = "Users",
    params(UserQuery),
    responses(
        (status = 204, description = "User deleted (or did not exist)"),
        (status = 400, description = "Missing username")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<NoContent> {
    let username = query
        .username
        .ok_or_else(|| AppError::bad_request("username query parameter is required"))?;

    state.user_service.delete_user(&username).await?;
    Ok(NoContent)
}
