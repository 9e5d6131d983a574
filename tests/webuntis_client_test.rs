mod common;

use chrono::NaiveDate;
use common::*;
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use untis_json::adapters::webuntis::WebUntisProvider;
use untis_json::config::CLIENT_NAME;
use untis_json::domain::model::{SchoolClass, WeekRange};
use untis_json::domain::ports::{ProviderSession, TimetableProvider};
use untis_json::domain::raw::RefEntry;
use untis_json::utils::error::ProviderError;

fn provider_for(server: &MockServer) -> WebUntisProvider {
    let config = config_for(server, "IT21a");
    WebUntisProvider::new(&config.server, SCHOOL, CLIENT_NAME, Duration::from_secs(5)).unwrap()
}

fn it21a() -> SchoolClass {
    SchoolClass {
        id: 11,
        name: "IT21a".to_string(),
        long_name: String::new(),
    }
}

#[tokio::test]
async fn test_login_sends_credentials_and_session_cookie() {
    let server = MockServer::start_async().await;

    let auth_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(RPC_PATH)
                .header("user-agent", CLIENT_NAME)
                .json_body_partial(
                    json!({
                        "method": "authenticate",
                        "params": {"user": "student", "password": "secret", "client": CLIENT_NAME}
                    })
                    .to_string(),
                );
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": "x", "result": {"sessionId": SESSION_ID}}));
        })
        .await;

    let classes_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(RPC_PATH)
                .header("cookie", format!("JSESSIONID={}", SESSION_ID))
                .json_body_partial(json!({"method": "getKlassen"}).to_string());
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": "x",
                "result": [{"id": 11, "name": "IT21a", "longName": "Fachinformatiker"}]
            }));
        })
        .await;
    let logout_mock = mock_logout(&server).await;

    let provider = provider_for(&server);
    let config = config_for(&server, "IT21a");
    let session = provider.login(&config.credentials()).await.unwrap();

    let classes = session.classes().await.unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "IT21a");
    assert_eq!(classes[0].long_name, "Fachinformatiker");

    session.logout().await.unwrap();

    auth_mock.assert_async().await;
    classes_mock.assert_async().await;
    logout_mock.assert_async().await;
}

#[tokio::test]
async fn test_rejected_login_is_authentication_error() {
    let server = MockServer::start_async().await;
    mock_rpc_error(&server, "authenticate", -8504, "bad credentials").await;

    let provider = provider_for(&server);
    let config = config_for(&server, "IT21a");
    let result = provider.login(&config.credentials()).await;

    match result {
        Err(ProviderError::Authentication { message }) => {
            assert!(message.contains("bad credentials"));
            assert!(message.contains("-8504"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("login should fail"),
    }
}

#[tokio::test]
async fn test_missing_session_id_is_authentication_error() {
    let server = MockServer::start_async().await;
    mock_rpc(&server, "authenticate", json!({"personType": 5})).await;

    let provider = provider_for(&server);
    let config = config_for(&server, "IT21a");

    assert!(matches!(
        provider.login(&config.credentials()).await,
        Err(ProviderError::Authentication { .. })
    ));
}

#[tokio::test]
async fn test_http_failure_is_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(RPC_PATH);
            then.status(503);
        })
        .await;

    let provider = provider_for(&server);
    let config = config_for(&server, "IT21a");
    let err = provider.login(&config.credentials()).await.err().unwrap();

    assert!(matches!(err, ProviderError::Transport(_)));
    assert!(err.is_upstream());
}

#[tokio::test]
async fn test_timetable_request_and_parsing() {
    let server = MockServer::start_async().await;
    mock_login(&server).await;

    let timetable_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(RPC_PATH).json_body_partial(
                json!({
                    "method": "getTimetable",
                    "params": {"options": {
                        "element": {"id": 11, "type": 1},
                        "startDate": 20261012,
                        "endDate": 20261017
                    }}
                })
                .to_string(),
            );
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": "x",
                "result": [{
                    "id": 900,
                    "date": 20261012,
                    "startTime": 800,
                    "endTime": 845,
                    "kl": [{"id": 11, "name": "IT21a"}],
                    "te": [{"id": 4, "orgid": 3, "name": "DOE"}],
                    "su": [{"id": 1, "name": "M"}],
                    "ro": [{"id": 7, "name": "B104"}],
                    "code": "irregular",
                    "substText": "Vertretung"
                }]
            }));
        })
        .await;

    let provider = provider_for(&server);
    let config = config_for(&server, "IT21a");
    let session = provider.login(&config.credentials()).await.unwrap();
    let week = WeekRange::containing(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());

    let periods = session.timetable(&it21a(), &week).await.unwrap();

    timetable_mock.assert_async().await;
    assert_eq!(periods.len(), 1);
    let period = &periods[0];
    assert_eq!(period.id, 900);
    assert_eq!(period.te, vec![RefEntry::Object { id: Some(4), orgid: Some(3) }]);
    assert_eq!(period.status_code(), Some("irregular"));
    assert_eq!(period.info_text(), Some("Vertretung"));
}

#[tokio::test]
async fn test_rpc_fault_after_login() {
    let server = MockServer::start_async().await;
    mock_login(&server).await;
    mock_rpc_error(&server, "getTimetable", -7004, "no allowed date").await;

    let provider = provider_for(&server);
    let config = config_for(&server, "IT21a");
    let session = provider.login(&config.credentials()).await.unwrap();
    let week = WeekRange::containing(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap());

    match session.timetable(&it21a(), &week).await {
        Err(ProviderError::Rpc { method, code, message }) => {
            assert_eq!(method, "getTimetable");
            assert_eq!(code, -7004);
            assert_eq!(message, "no allowed date");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_unexpected_result_shape_is_invalid_response() {
    let server = MockServer::start_async().await;
    mock_login(&server).await;
    mock_rpc(&server, "getRooms", json!({"rooms": "not a list"})).await;

    let provider = provider_for(&server);
    let config = config_for(&server, "IT21a");
    let session = provider.login(&config.credentials()).await.unwrap();

    let err = session.rooms().await.unwrap_err();
    assert!(matches!(&err, ProviderError::InvalidResponse { method, .. } if method == "getRooms"));
    assert!(!err.is_upstream());
}
