//! Wire-level tests for the KMS client against a mock HTTP server

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use macseal_core::KeyVersionName;
use macseal_kms::{BackendError, CloudKmsClient, MacBackend};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Mock key-management endpoint: MACs are `data` prefixed with "mac:"
async fn kms_handler(Path(path): Path<String>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let data = body
        .get("data")
        .and_then(|v| v.as_str())
        .and_then(|s| BASE64.decode(s).ok())
        .unwrap_or_default();

    let mut expected_mac = b"mac:".to_vec();
    expected_mac.extend_from_slice(&data);

    if path.ends_with(":macSign") {
        (StatusCode::OK, Json(json!({"mac": BASE64.encode(&expected_mac)})))
    } else if path.ends_with(":macVerify") {
        let provided = body
            .get("mac")
            .and_then(|v| v.as_str())
            .and_then(|s| BASE64.decode(s).ok())
            .unwrap_or_default();
        (StatusCode::OK, Json(json!({"success": provided == expected_mac})))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"code": 404, "message": "unknown method", "status": "NOT_FOUND"}})),
        )
    }
}

async fn denied_handler(Path(_path): Path<String>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"error": {"code": 403, "message": "permission denied on key", "status": "PERMISSION_DENIED"}})),
    )
}

async fn start_mock_server(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    addr
}

fn test_key() -> KeyVersionName {
    KeyVersionName::new("proj", "global", "ring", "key", "1")
}

#[tokio::test]
async fn test_mac_sign_round_trip() {
    let addr = start_mock_server(Router::new().route("/*path", post(kms_handler))).await;
    let client = CloudKmsClient::new(format!("http://{}", addr), None);

    let mac = client.mac_sign(&test_key(), b"canonical bytes").await.unwrap();

    assert_eq!(mac, b"mac:canonical bytes");
}

#[tokio::test]
async fn test_mac_verify_success_and_mismatch() {
    let addr = start_mock_server(Router::new().route("/*path", post(kms_handler))).await;
    let client = CloudKmsClient::new(format!("http://{}", addr), None);
    let key = test_key();

    let mac = client.mac_sign(&key, b"payload").await.unwrap();

    assert!(client.mac_verify(&key, b"payload", &mac).await.unwrap());
    // Mismatch is Ok(false), not an error
    assert!(!client.mac_verify(&key, b"tampered", &mac).await.unwrap());
}

#[tokio::test]
async fn test_error_status_surfaces_message() {
    let addr = start_mock_server(Router::new().route("/*path", post(denied_handler))).await;
    let client = CloudKmsClient::new(format!("http://{}", addr), None);

    let result = client.mac_sign(&test_key(), b"data").await;

    match result {
        Err(BackendError::Status { code, message }) => {
            assert_eq!(code, 403);
            assert!(message.contains("permission denied"));
        }
        other => panic!("expected status error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = CloudKmsClient::new("http://127.0.0.1:1", None);

    let result = client.mac_sign(&test_key(), b"data").await;

    assert!(matches!(result, Err(BackendError::Transport(_))));
}
