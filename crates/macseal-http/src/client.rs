//! Reqwest-based client for the sign/verify endpoints
//!
//! Used by the CLI and the integration tests.

use macseal_core::{SignedEnvelope, VerifyOutcome, VerifyRequest};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors from the HTTP client side of the service
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for a running macseal service
///
/// # Example
///
/// ```ignore
/// use macseal_http::SealClient;
///
/// let client = SealClient::new("http://localhost:8080");
/// let envelope = client.sign(&serde_json::json!({"x": 1})).await?;
/// let valid = client.verify(&envelope.payload, &envelope.signature).await?;
/// ```
pub struct SealClient {
    client: Client,
    base_url: String,
}

impl SealClient {
    /// Create a new client with the given base URL (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("reqwest client construction cannot fail with static options"),
            base_url: base_url.into(),
        }
    }

    /// Create a client with custom reqwest settings
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sign a payload, returning the timestamped envelope
    pub async fn sign(&self, payload: &Value) -> Result<SignedEnvelope, ClientError> {
        let url = format!("{}/sign", self.base_url);
        let response = self.client.post(&url).json(payload).send().await?;
        Self::decode(response).await
    }

    /// Verify a signed payload, returning the backend's verdict
    pub async fn verify(&self, payload: &Value, signature: &str) -> Result<bool, ClientError> {
        let url = format!("{}/verify", self.base_url);
        let request = VerifyRequest {
            payload: payload.clone(),
            signature: signature.to_string(),
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let outcome: VerifyOutcome = Self::decode(response).await?;
        Ok(outcome.valid)
    }

    async fn decode<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

impl Default for SealClient {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
