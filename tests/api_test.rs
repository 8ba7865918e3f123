//! Integration tests for API endpoints.
//!
//! Most tests mock the services to pin down the HTTP contract; the
//! end-to-end test wires real services to an in-memory store.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use mockall::mock;
use serde_json::{json, Value};
use tower::ServiceExt;

use lifeguard::api::{create_router, docs_router, AppState};
use lifeguard::domain::{Device, Neighbor, UpdateUser, User};
use lifeguard::errors::{AppError, AppResult};
use lifeguard::services::{DeviceService, NeighborService, Services, UserService};

// =============================================================================
// Mock Services
// =============================================================================

mock! {
    Users {}

    #[async_trait]
    impl UserService for Users {
        async fn create_user(&self, username: &str) -> AppResult<User>;
        async fn create_user_with_flags(&self, username: &str, initial: UpdateUser) -> AppResult<User>;
        async fn get_user(&self, username: &str) -> AppResult<Option<User>>;
        async fn user_exists(&self, username: &str) -> AppResult<bool>;
        async fn list_users(&self) -> AppResult<Vec<User>>;
        async fn update_user(&self, username: &str, changes: UpdateUser) -> AppResult<Option<User>>;
        async fn delete_user(&self, username: &str) -> AppResult<()>;
    }
}

mock! {
    Devices {}

    #[async_trait]
    impl DeviceService for Devices {
        async fn onboard_device(&self, device: Device) -> AppResult<()>;
        async fn remove_device(&self, device_id: i64) -> AppResult<()>;
        async fn get_device(&self, device_id: &str) -> AppResult<Option<Device>>;
        async fn get_all_users(&self) -> AppResult<Vec<User>>;
    }
}

mock! {
    Neighbors {}

    #[async_trait]
    impl NeighborService for Neighbors {
        async fn add_neighbor(&self, neighbor: Neighbor) -> AppResult<Neighbor>;
        async fn get_neighbor(&self, username: &str) -> AppResult<Option<Neighbor>>;
        async fn list_neighbors(&self) -> AppResult<Vec<Neighbor>>;
        async fn remove_neighbor(&self, username: &str) -> AppResult<()>;
    }
}

// =============================================================================
// Helpers
// =============================================================================

async fn mocked_app(users: MockUsers, devices: MockDevices, neighbors: MockNeighbors) -> Router {
    let services = Services::new(Arc::new(users), Arc::new(devices), Arc::new(neighbors));
    let state = AppState::new("test", &services, common::memory_provider().await);
    create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn get_missing_user_is_404() {
    let mut users = MockUsers::new();
    users.expect_get_user().times(1).returning(|username| {
        assert_eq!(username, "nobody");
        Ok(None)
    });
    let app = mocked_app(users, MockDevices::new(), MockNeighbors::new()).await;

    let (status, body) = send(&app, Method::GET, "/user?username=nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
async fn get_user_without_username_lists_all() {
    let mut users = MockUsers::new();
    users
        .expect_list_users()
        .returning(|| Ok(vec![User::new("alice"), User::new("bob")]));
    let app = mocked_app(users, MockDevices::new(), MockNeighbors::new()).await;

    let (status, body) = send(&app, Method::GET, "/user", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[0]["isHome"], json!(false));
}

#[tokio::test]
async fn post_existing_user_updates_flags() {
    let mut users = MockUsers::new();
    users.expect_user_exists().returning(|_| Ok(true));
    users.expect_create_user().never();
    users.expect_create_user_with_flags().never();
    users.expect_update_user().times(1).returning(|username, changes| {
        assert_eq!(changes.is_home, Some(true));
        let mut user = User::new(username);
        user.is_home = true;
        Ok(Some(user))
    });
    let app = mocked_app(users, MockDevices::new(), MockNeighbors::new()).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/user",
        Some(json!({"username": "alice", "isHome": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isHome"], json!(true));
}

#[tokio::test]
async fn post_new_user_with_flags_is_a_single_insert() {
    let mut users = MockUsers::new();
    users.expect_user_exists().returning(|_| Ok(false));
    users.expect_update_user().never();
    users
        .expect_create_user_with_flags()
        .times(1)
        .returning(|username, initial| {
            assert_eq!(initial.pool_is_supervised, Some(true));
            Ok(User::new(username).with_changes(&initial))
        });
    let app = mocked_app(users, MockDevices::new(), MockNeighbors::new()).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/user",
        Some(json!({"username": "alice", "poolIsSupervised": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["poolIsSupervised"], json!(true));
    assert_eq!(body["isHome"], json!(false));
}

#[tokio::test]
async fn post_user_with_empty_name_is_rejected() {
    let app = mocked_app(MockUsers::new(), MockDevices::new(), MockNeighbors::new()).await;

    let (status, body) = send(&app, Method::POST, "/user", Some(json!({"username": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn delete_user_requires_username() {
    let app = mocked_app(MockUsers::new(), MockDevices::new(), MockNeighbors::new()).await;

    let (status, body) = send(&app, Method::DELETE, "/user", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

// =============================================================================
// Devices
// =============================================================================

#[tokio::test]
async fn onboarding_for_unknown_user_is_404() {
    let mut users = MockUsers::new();
    users.expect_user_exists().returning(|_| Ok(false));
    let mut devices = MockDevices::new();
    devices.expect_onboard_device().never();
    let app = mocked_app(users, devices, MockNeighbors::new()).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/device",
        Some(json!({"deviceID": 1001, "username": "ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_device_id_on_delete_is_400() {
    let mut devices = MockDevices::new();
    devices.expect_remove_device().never();
    let app = mocked_app(MockUsers::new(), devices, MockNeighbors::new()).await;

    let (status, body) = send(&app, Method::DELETE, "/device?deviceID=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "MALFORMED_INPUT");
}

#[tokio::test]
async fn storage_failure_reports_its_label() {
    let mut devices = MockDevices::new();
    devices.expect_get_all_users().returning(|| {
        Err(AppError::storage(
            "getalluser error",
            sea_orm::DbErr::Custom("connection reset".into()),
        ))
    });
    let app = mocked_app(MockUsers::new(), devices, MockNeighbors::new()).await;

    let (status, body) = send(&app, Method::GET, "/device", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(&body), "DATABASE_ERROR");
    assert_eq!(body["error"]["message"], json!("getalluser error"));
}

// =============================================================================
// Neighbors
// =============================================================================

#[tokio::test]
async fn neighbor_of_unknown_user_is_404() {
    let mut users = MockUsers::new();
    users.expect_user_exists().returning(|username| {
        assert_eq!(username, "alice");
        Ok(false)
    });
    let mut neighbors = MockNeighbors::new();
    neighbors.expect_add_neighbor().never();
    let app = mocked_app(users, MockDevices::new(), neighbors).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/neighbor",
        Some(json!({"username": "dave", "neighborOf": "alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn neighbor_routes_cover_get_post_and_delete() {
    let mut users = MockUsers::new();
    users.expect_user_exists().returning(|_| Ok(true));
    let mut neighbors = MockNeighbors::new();
    neighbors.expect_add_neighbor().returning(Ok);
    neighbors
        .expect_get_neighbor()
        .returning(|username| Ok(Some(Neighbor::new(username, "alice"))));
    neighbors.expect_remove_neighbor().times(1).returning(|_| Ok(()));
    let app = mocked_app(users, MockDevices::new(), neighbors).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/neighbor",
        Some(json!({"username": "dave", "neighborOf": "alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"username": "dave", "neighborOf": "alice"}));

    let (status, body) = send(&app, Method::GET, "/neighbor?username=dave", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["neighborOf"], json!("alice"));

    let (status, _) = send(&app, Method::DELETE, "/neighbor?username=dave", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

// =============================================================================
// End to end
// =============================================================================

#[tokio::test]
async fn onboarding_flow_over_http() {
    let provider = common::memory_provider().await;
    let state = tokio_test::assert_ok!(AppState::from_provider(
        "test",
        provider,
        &common::tables()
    ));
    let app = create_router(state);

    for username in ["alice", "bob"] {
        let (status, body) =
            send(&app, Method::POST, "/user", Some(json!({"username": username}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["deviceID"], Value::Null);
    }
    for (id, username) in [(1001, "alice"), (1002, "bob")] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/device",
            Some(json!({"deviceID": id, "username": username})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"deviceID": id, "username": username}));
    }

    let (status, body) = send(&app, Method::GET, "/device?deviceID=1001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deviceID": 1001, "username": "alice"}));

    let (status, _) = send(&app, Method::GET, "/device?deviceID=9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/device?deviceID=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "MALFORMED_INPUT");

    let (status, body) = send(&app, Method::GET, "/device", None).await;
    assert_eq!(status, StatusCode::OK);
    let mut listed: Vec<Value> = body.as_array().cloned().unwrap_or_default();
    listed.sort_by_key(|u| u["username"].as_str().map(str::to_owned));
    assert_eq!(
        listed,
        vec![
            json!({"username": "alice", "deviceID": 1001, "isHome": false, "poolIsSupervised": false}),
            json!({"username": "bob", "deviceID": 1002, "isHome": false, "poolIsSupervised": false}),
        ]
    );

    let (status, body) = send(&app, Method::GET, "/user?username=alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deviceID"], json!(1001));

    let (status, _) = send(
        &app,
        Method::POST,
        "/user",
        Some(json!({"username": "carol", "isHome": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, body) = send(&app, Method::GET, "/user?username=carol", None).await;
    assert_eq!(body["isHome"], json!(true));
    assert_eq!(body["poolIsSupervised"], json!(false));

    let (status, _) = send(&app, Method::DELETE, "/device?deviceID=1001", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, "/device?deviceID=1001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["environment"], json!("test"));
}

#[tokio::test]
async fn docs_router_serves_openapi_document() {
    let (status, body) = send(&docs_router(), Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], json!("LifeGuard API"));
    assert!(body["paths"]["/device"].is_object());
}
