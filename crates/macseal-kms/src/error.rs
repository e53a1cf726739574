//! Error types for the signing backend facade

use thiserror::Error;

/// Failures of the key-management collaborator call itself
///
/// A MAC mismatch is not represented here: verification reports it as a
/// successful call returning `false`.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to key-management service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("key-management service returned {code}: {message}")]
    Status { code: u16, message: String },

    #[error("unexpected response from key-management service: {0}")]
    Decode(String),
}
