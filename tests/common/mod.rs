#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};
use untis_json::{create_router, AppState, UntisConfig};

pub const SCHOOL: &str = "Test School";
pub const SESSION_ID: &str = "ABC123SESSION";
pub const RPC_PATH: &str = "/WebUntis/jsonrpc.do";

pub fn config_for(server: &MockServer, class_name: &str) -> UntisConfig {
    let base_url = server.base_url();
    UntisConfig::from_lookup(|key| {
        let value = match key {
            "USERNAME" => "student",
            "PASSWORD" => "secret",
            "SCHOOL" => SCHOOL,
            "SERVER" => base_url.as_str(),
            "MYCLASS" => class_name,
            _ => return None,
        };
        Some(value.to_string())
    })
    .expect("test config should be valid")
}

/// Mocks one JSON-RPC method answering with `result`.
pub async fn mock_rpc<'a>(server: &'a MockServer, method: &str, result: Value) -> Mock<'a> {
    let partial = json!({ "method": method }).to_string();
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(RPC_PATH)
                .query_param_exists("school")
                .json_body_partial(partial);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"jsonrpc": "2.0", "id": "untis-json", "result": result}));
        })
        .await
}

/// Mocks one JSON-RPC method answering with an error object.
pub async fn mock_rpc_error<'a>(
    server: &'a MockServer,
    method: &str,
    code: i64,
    message: &str,
) -> Mock<'a> {
    let partial = json!({ "method": method }).to_string();
    server
        .mock_async(|when, then| {
            when.method(POST).path(RPC_PATH).json_body_partial(partial);
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": "untis-json",
                "error": {"code": code, "message": message}
            }));
        })
        .await
}

pub async fn mock_login(server: &MockServer) -> Mock<'_> {
    mock_rpc(
        server,
        "authenticate",
        json!({"sessionId": SESSION_ID, "personType": 5, "personId": 1234}),
    )
    .await
}

pub async fn mock_directories(server: &MockServer) {
    mock_rpc(
        server,
        "getKlassen",
        json!([
            {"id": 11, "name": "IT21a", "longName": "Fachinformatiker 21a", "active": true},
            {"id": 12, "name": "IT21b", "longName": "Fachinformatiker 21b", "active": true}
        ]),
    )
    .await;
    mock_rpc(
        server,
        "getSubjects",
        json!([
            {"id": 1, "name": "M", "longName": "Mathematik"},
            {"id": 2, "name": "AE", "longName": ""}
        ]),
    )
    .await;
    mock_rpc(
        server,
        "getTeachers",
        json!([
            {"id": 3, "name": "DOE", "foreName": "Jane", "longName": "Doe"}
        ]),
    )
    .await;
    mock_rpc(
        server,
        "getRooms",
        json!([
            {"id": 7, "name": "B104", "longName": "Labor"}
        ]),
    )
    .await;
}

pub async fn mock_logout(server: &MockServer) -> Mock<'_> {
    mock_rpc(server, "logout", Value::Null).await
}

/// Serves the app on an ephemeral port and returns its base URL.
pub async fn spawn_app(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}
