//! Key-version resource name handling
//!
//! The signing collaborator addresses keys by a fully-qualified resource
//! name. It is built once at startup and immutable for the process lifetime;
//! key rotation is out of scope.

use std::fmt;

/// Fully-qualified name of a key version in the key-management service
///
/// Renders as
/// `projects/{p}/locations/{l}/keyRings/{r}/cryptoKeys/{k}/cryptoKeyVersions/{v}`.
///
/// # Example
///
/// ```rust
/// use macseal_core::KeyVersionName;
///
/// let key = KeyVersionName::new("my-project", "global", "my-ring", "my-key", "1");
/// assert_eq!(
///     key.resource_name(),
///     "projects/my-project/locations/global/keyRings/my-ring/cryptoKeys/my-key/cryptoKeyVersions/1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyVersionName {
    project: String,
    location: String,
    key_ring: String,
    key: String,
    version: String,
}

impl KeyVersionName {
    pub fn new(
        project: impl Into<String>,
        location: impl Into<String>,
        key_ring: impl Into<String>,
        key: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            location: location.into(),
            key_ring: key_ring.into(),
            key: key.into(),
            version: version.into(),
        }
    }

    /// The full resource name used to address the key version
    pub fn resource_name(&self) -> String {
        format!(
            "projects/{}/locations/{}/keyRings/{}/cryptoKeys/{}/cryptoKeyVersions/{}",
            self.project, self.location, self.key_ring, self.key, self.version
        )
    }
}

impl fmt::Display for KeyVersionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_name())
    }
}
