// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use room_sensor_bridge::config::Config;
use room_sensor_bridge::db::SqliteDb;
use room_sensor_bridge::models::Credential;
use room_sensor_bridge::routes::create_router;
use room_sensor_bridge::time_utils::now_epoch_secs;
use room_sensor_bridge::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ROOM_ID: &str = "5";
pub const RESERVATIONS_PATH: &str = "/api/v4/calendars/reservations/";
pub const TOKEN_PATH: &str = "/oauth/token/";
pub const VALID_TOKEN: &str = "valid-access-token";

/// App wired to a mock calendar server and an in-memory database.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub server: MockServer,
}

/// Config pointing every outbound call at `server`.
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    Config {
        api_base_url: format!("{}/api/v4/calendars", server.uri()),
        oauth_token_url: format!("{}{}", server.uri(), TOKEN_PATH),
        ..Config::default()
    }
}

/// A credential refreshed `age` seconds ago with a one hour lifetime.
#[allow(dead_code)]
pub fn credential_aged(age: i64) -> Credential {
    Credential {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        refresh_token: "old-refresh-token".to_string(),
        access_token: VALID_TOKEN.to_string(),
        expires_in: 3600,
        updated_at: Some(now_epoch_secs() - age),
    }
}

/// Build a test app whose store holds `credential` (or nothing).
#[allow(dead_code)]
pub async fn create_test_app_with(
    config_fn: impl FnOnce(Config) -> Config,
    credential: Option<Credential>,
) -> TestApp {
    let server = MockServer::start().await;
    let config = config_fn(test_config(&server));

    let db = SqliteDb::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    db.init_schema().await.expect("Failed to create schema");
    if let Some(credential) = credential {
        db.set_credential(&credential)
            .await
            .expect("Failed to store credential");
    }

    let state = Arc::new(AppState::new(config, db).expect("Failed to build state"));
    TestApp {
        router: create_router(state.clone()),
        state,
        server,
    }
}

/// Test app with a freshly refreshed credential.
#[allow(dead_code)]
pub async fn create_test_app() -> TestApp {
    create_test_app_with(|c| c, Some(credential_aged(0))).await
}

/// A reservation JSON object spanning `[now + start_offset, now + end_offset]`.
#[allow(dead_code)]
pub fn reservation_json(id: u64, start_offset: i64, end_offset: i64) -> Value {
    let now = now_epoch_secs();
    json!({
        "id": id,
        "title": "Team sync",
        "starts_at": now + start_offset,
        "ends_at": now + end_offset
    })
}

/// Serve `reservations` for `GET /reservations/?room_id[]=ROOM_ID`.
#[allow(dead_code)]
pub async fn mount_reservations(server: &MockServer, reservations: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(RESERVATIONS_PATH))
        .and(query_param("room_id[]", ROOM_ID))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "reservations": reservations })),
        )
        .mount(server)
        .await;
}

/// Requests the mock server saw with the given HTTP method.
#[allow(dead_code)]
pub async fn requests_with_method(server: &MockServer, verb: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == verb)
        .collect()
}
