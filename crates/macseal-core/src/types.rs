//! Wire types for the sign/verify HTTP surface

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of a successful sign call: the timestamp-bearing payload and the
/// base64-encoded MAC over its canonical bytes.
///
/// Clients round-trip this envelope verbatim into a [`VerifyRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignedEnvelope {
    pub payload: Value,
    pub signature: String,
}

/// Request body for the verify endpoint
///
/// `payload` may be any JSON value; it is canonicalized exactly as the sign
/// path canonicalized it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyRequest {
    pub payload: Value,
    pub signature: String,
}

/// Response body for the verify endpoint
///
/// A MAC mismatch is `valid: false`, not an error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub valid: bool,
}
