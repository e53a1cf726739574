//! Axum extractors for the signing endpoints

use crate::error::ApiError;
use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

/// JSON body extractor whose rejection is the service's own error shape
///
/// `axum::Json`'s rejection produces a plain-text body; every error leaving
/// this service must be `{"error": <message>}`, so body parsing goes through
/// this extractor instead.
///
/// # Example
///
/// ```ignore
/// use macseal_http::JsonBody;
/// use macseal_core::VerifyRequest;
///
/// async fn handler(JsonBody(request): JsonBody<VerifyRequest>) {
///     // request parsed, parse failures already mapped to ApiError
/// }
/// ```
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidJson(e.to_string()))?;

        let value =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidJson(e.to_string()))?;

        Ok(JsonBody(value))
    }
}
