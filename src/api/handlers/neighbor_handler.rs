//! Neighbor handlers.

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
use crate::domain::Neighbor;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::{Created, NoContent};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NeighborQuery {
    /// The neighbor's username
    pub username: Option<String>,
}

/// Register a neighbor for an existing user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddNeighborRequest {
    #[validate(length(min = 1, max = 64, message = "must be 1 to 64 characters"))]
    #[schema(example = "dave")]
    pub username: String,
    #[serde(rename = "neighborOf")]
    #[validate(length(min = 1, max = 64, message = "must be 1 to 64 characters"))]
    #[schema(example = "alice")]
    pub neighbor_of: String,
}

/// Create neighbor routes
pub fn neighbor_routes() -> Router<AppState> {
    Router::new().route(
        "/neighbor",
        get(get_neighbor).post(add_neighbor).delete(remove_neighbor),
    )
}

/// Get one neighbor, or every neighbor when no username is given
#[utoipa::path(
    get,
    path = "/neighbor",
    tag = "Neighbors",
    params(NeighborQuery),
    responses(
        (status = 200, description = "The neighbor, or all neighbors without `username`", body = Neighbor),
        (status = 404, description = "Neighbor not found")
    )
)]
pub async fn get_neighbor(
    State(state): State<AppState>,
    Query(query): Query<NeighborQuery>,
) -> AppResult<Response> {
    match query.username {
        Some(username) => {
            let neighbor = state
                .neighbor_service
                .get_neighbor(&username)
                .await?
                .ok_or_not_found()?;
            Ok(Json(neighbor).into_response())
        }
        None => {
            let neighbors = state.neighbor_service.list_neighbors().await?;
            Ok(Json(neighbors).into_response())
        }
    }
}

/// Add a neighbor
#[utoipa::path(
    post,
    path = "/neighbor",
    tag = "Neighbors",
    request_body = AddNeighborRequest,
    responses(
        (status = 201, description = "Neighbor added", body = Neighbor),
        (status = 400, description = "Validation error"),
        (status = 404, description = "The watched user does not exist")
    )
)]
pub async fn add_neighbor(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddNeighborRequest>,
) -> AppResult<Created<Neighbor>> {
    if !state.user_service.user_exists(&payload.neighbor_of).await? {
        return Err(AppError::NotFound);
    }

    let neighbor = state
        .neighbor_service
        .add_neighbor(Neighbor::new(payload.username, payload.neighbor_of))
        .await?;

    Ok(Created(neighbor))
}

/// Remove a neighbor
#[utoipa::path(
    delete,
    path = "/neighbor",
    tag = "Neighbors",
    params(NeighborQuery),
    responses(
        (status = 204, description = "Neighbor removed (or did not exist)"),
        (status = 400, description = "Missing username")
    )
)]
pub async fn remove_neighbor(
    State(state): State<AppState>,
    Query(query): Query<NeighborQuery>,
) -> AppResult<NoContent> {
    let username = query
        .username
        .ok_or_else(|| AppError::bad_request("username query parameter is required"))?;

    state.neighbor_service.remove_neighbor(&username).await?;
    Ok(NoContent)
}
