//! The signing backend seam
//!
//! Handlers depend on this trait rather than on a concrete client, so tests
//! can substitute a deterministic in-process backend.

use crate::error::BackendError;
use async_trait::async_trait;
use macseal_core::KeyVersionName;

/// MAC sign/verify operations of the external key-management collaborator
///
/// One handle is constructed at startup and shared by every concurrent
/// request; implementations must be safe for concurrent use. Each call is
/// independent and synchronous from the caller's perspective: no retries,
/// caching, or batching.
#[async_trait]
pub trait MacBackend: Send + Sync {
    /// Produce a MAC over `data` with the addressed key version
    async fn mac_sign(&self, key: &KeyVersionName, data: &[u8]) -> Result<Vec<u8>, BackendError>;

    /// Check `mac` against `data` with the addressed key version
    ///
    /// Returns `Ok(false)` for a mismatch; `Err` only when the call itself
    /// fails.
    async fn mac_verify(
        &self,
        key: &KeyVersionName,
        data: &[u8],
        mac: &[u8],
    ) -> Result<bool, BackendError>;
}
