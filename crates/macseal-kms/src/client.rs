//! Reqwest-based client for the Cloud KMS MAC endpoints

use crate::backend::MacBackend;
use crate::error::BackendError;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use macseal_core::KeyVersionName;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the key-management service's REST MAC surface
///
/// Wraps `POST {endpoint}/{resource_name}:macSign` and `:macVerify`.
/// Constructed once at startup and shared across all request handlers.
///
/// # Example
///
/// ```ignore
/// use macseal_kms::CloudKmsClient;
///
/// let kms = CloudKmsClient::new("https://cloudkms.googleapis.com/v1", None);
/// let mac = kms.mac_sign(&key, b"canonical bytes").await?;
/// ```
pub struct CloudKmsClient {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
}

#[derive(Serialize)]
struct MacSignRequest<'a> {
    data: &'a str,
}

#[derive(Deserialize)]
struct MacSignResponse {
    mac: String,
}

#[derive(Serialize)]
struct MacVerifyRequest<'a> {
    data: &'a str,
    mac: &'a str,
}

#[derive(Deserialize)]
struct MacVerifyResponse {
    #[serde(default)]
    success: bool,
}

#[derive(Deserialize)]
struct StatusBody {
    error: StatusError,
}

#[derive(Deserialize)]
struct StatusError {
    message: String,
}

impl CloudKmsClient {
    /// Create a new client for the given API endpoint
    ///
    /// The endpoint should not include a trailing slash. `access_token` is an
    /// optional static bearer token; authentication is otherwise out-of-band.
    pub fn new(endpoint: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("reqwest client construction cannot fail with static options"),
            endpoint: endpoint.into(),
            access_token,
        }
    }

    /// Create a client with custom reqwest settings
    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        access_token: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            access_token,
        }
    }

    /// Get the configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize,
        R: for<'de> Deserialize<'de>,
    {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<StatusBody>().await {
                Ok(body) => body.error.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            return Err(BackendError::Status {
                code: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl MacBackend for CloudKmsClient {
    async fn mac_sign(&self, key: &KeyVersionName, data: &[u8]) -> Result<Vec<u8>, BackendError> {
        let url = format!("{}/{}:macSign", self.endpoint, key.resource_name());
        let encoded = BASE64.encode(data);

        tracing::debug!(key = %key, bytes = data.len(), "requesting MAC signature");

        let response: MacSignResponse = self
            .post_json(&url, &MacSignRequest { data: &encoded })
            .await?;

        BASE64
            .decode(&response.mac)
            .map_err(|e| BackendError::Decode(format!("mac field is not valid base64: {}", e)))
    }

    async fn mac_verify(
        &self,
        key: &KeyVersionName,
        data: &[u8],
        mac: &[u8],
    ) -> Result<bool, BackendError> {
        let url = format!("{}/{}:macVerify", self.endpoint, key.resource_name());
        let encoded_data = BASE64.encode(data);
        let encoded_mac = BASE64.encode(mac);

        tracing::debug!(key = %key, bytes = data.len(), "requesting MAC verification");

        let response: MacVerifyResponse = self
            .post_json(
                &url,
                &MacVerifyRequest {
                    data: &encoded_data,
                    mac: &encoded_mac,
                },
            )
            .await?;

        Ok(response.success)
    }
}
