//! Sign and verify request handlers

use crate::error::ApiError;
use crate::extract::JsonBody;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{SecondsFormat, Utc};
use macseal_canonical::to_canonical_json;
use macseal_core::{KeyVersionName, SignedEnvelope, VerifyOutcome, VerifyRequest};
use macseal_kms::MacBackend;
use serde_json::Value;
use std::sync::Arc;

/// Shared handler state: the fixed key version and the one backend handle
///
/// Built once at startup; requests only read it. The backend handle is safe
/// for concurrent use and never recreated per call.
#[derive(Clone)]
pub struct AppState {
    pub key: KeyVersionName,
    pub backend: Arc<dyn MacBackend>,
}

impl AppState {
    pub fn new(key: KeyVersionName, backend: Arc<dyn MacBackend>) -> Self {
        Self { key, backend }
    }
}

/// Build the service router
///
/// `POST /sign` and `POST /verify`; any other method on these paths gets a
/// 405 with the JSON error body.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sign", post(sign).fallback(method_not_allowed))
        .route("/verify", post(verify).fallback(method_not_allowed))
        .with_state(state)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Sign an arbitrary JSON object
///
/// Injects a `timestamp` field (UTC, RFC 3339 nanosecond precision),
/// canonicalizes the result, and MACs the canonical bytes with the fixed key
/// version. The response carries the timestamp-bearing payload so the client
/// can round-trip it into a verify call byte-for-byte.
pub async fn sign(
    State(state): State<AppState>,
    JsonBody(mut payload): JsonBody<Value>,
) -> Result<Json<SignedEnvelope>, ApiError> {
    let Some(object) = payload.as_object_mut() else {
        return Err(ApiError::PayloadNotObject);
    };

    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);
    object.insert("timestamp".to_string(), Value::String(timestamp));

    let canonical = to_canonical_json(&payload)?;

    tracing::info!(key = %state.key, bytes = canonical.len(), "signing payload");

    let mac = state
        .backend
        .mac_sign(&state.key, &canonical)
        .await
        .map_err(ApiError::SigningBackend)?;

    Ok(Json(SignedEnvelope {
        payload,
        signature: BASE64.encode(mac),
    }))
}

/// Verify a previously signed payload
///
/// Canonicalizes the supplied payload with the same writer the sign path
/// used, then asks the backend whether the MAC matches. A mismatch is a
/// successful call reporting `valid: false`. The base64 signature is decoded
/// before the backend is touched, so a malformed signature costs no
/// collaborator call.
pub async fn verify(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<VerifyRequest>,
) -> Result<Json<VerifyOutcome>, ApiError> {
    let canonical = to_canonical_json(&request.payload)?;

    let mac = BASE64
        .decode(&request.signature)
        .map_err(|e| ApiError::InvalidSignatureEncoding(e.to_string()))?;

    tracing::info!(key = %state.key, bytes = canonical.len(), "verifying payload");

    let valid = state
        .backend
        .mac_verify(&state.key, &canonical, &mac)
        .await
        .map_err(ApiError::VerificationBackend)?;

    Ok(Json(VerifyOutcome { valid }))
}
