//! Process configuration
//!
//! Loaded once at startup from environment variables, with an optional local
//! `.env` file for development. The resulting [`Config`] is immutable and
//! shared for the process lifetime.

use crate::error::ConfigError;
use crate::key::KeyVersionName;
use std::path::Path;

pub const DEFAULT_KMS_ENDPOINT: &str = "https://cloudkms.googleapis.com/v1";

/// Startup configuration for the signing service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub project: String,
    pub location: String,
    pub key_ring: String,
    pub key: String,
    pub key_version: String,
    pub port: u16,
    pub kms_endpoint: String,
    /// Static bearer token for the key-management service. Authentication is
    /// otherwise out-of-band; when unset no credentials are attached.
    pub access_token: Option<String>,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `GOOGLE_CLOUD_PROJECT` | required |
    /// | `KMS_LOCATION` | `global` |
    /// | `KMS_KEY_RING` | required |
    /// | `KMS_KEY` | required |
    /// | `KMS_KEY_VERSION` | `1` |
    /// | `PORT` | `8080` |
    /// | `KMS_ENDPOINT` | `https://cloudkms.googleapis.com/v1` |
    /// | `KMS_ACCESS_TOKEN` | none |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(var))
        };
        let or_default =
            |var: &str, default: &str| lookup(var).filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string());

        let port_raw = or_default("PORT", "8080");
        let port = port_raw
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidVar {
                var: "PORT",
                reason: e.to_string(),
            })?;

        Ok(Self {
            project: require("GOOGLE_CLOUD_PROJECT")?,
            location: or_default("KMS_LOCATION", "global"),
            key_ring: require("KMS_KEY_RING")?,
            key: require("KMS_KEY")?,
            key_version: or_default("KMS_KEY_VERSION", "1"),
            port,
            kms_endpoint: or_default("KMS_ENDPOINT", DEFAULT_KMS_ENDPOINT),
            access_token: lookup("KMS_ACCESS_TOKEN").filter(|v| !v.is_empty()),
        })
    }

    /// The fixed key-version name this process signs and verifies with
    pub fn key_version_name(&self) -> KeyVersionName {
        KeyVersionName::new(
            &self.project,
            &self.location,
            &self.key_ring,
            &self.key,
            &self.key_version,
        )
    }
}

/// Apply a local `.env` file to the process environment
///
/// Lines are `KEY=VALUE`; blank lines and `#` comments are skipped.
/// Variables already present in the environment are never overridden, so the
/// file only fills gaps during local development. A missing file is not an
/// error.
pub fn load_env_file(path: impl AsRef<Path>) -> std::io::Result<bool> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');
        if !key.is_empty() && std::env::var_os(key).is_none() {
            std::env::set_var(key, value);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lookup(map: &HashMap<String, String>) -> impl Fn(&str) -> Option<String> + '_ {
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let vars = env(&[
            ("GOOGLE_CLOUD_PROJECT", "proj"),
            ("KMS_KEY_RING", "ring"),
            ("KMS_KEY", "key"),
        ]);
        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.location, "global");
        assert_eq!(config.key_version, "1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.kms_endpoint, DEFAULT_KMS_ENDPOINT);
        assert_eq!(config.access_token, None);
    }

    #[test]
    fn test_missing_project_rejected() {
        let vars = env(&[("KMS_KEY_RING", "ring"), ("KMS_KEY", "key")]);
        let result = Config::from_lookup(lookup(&vars));

        assert!(matches!(
            result,
            Err(ConfigError::MissingVar("GOOGLE_CLOUD_PROJECT"))
        ));
    }

    #[test]
    fn test_empty_value_treated_as_missing() {
        let vars = env(&[
            ("GOOGLE_CLOUD_PROJECT", ""),
            ("KMS_KEY_RING", "ring"),
            ("KMS_KEY", "key"),
        ]);
        let result = Config::from_lookup(lookup(&vars));

        assert!(matches!(
            result,
            Err(ConfigError::MissingVar("GOOGLE_CLOUD_PROJECT"))
        ));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let vars = env(&[
            ("GOOGLE_CLOUD_PROJECT", "proj"),
            ("KMS_KEY_RING", "ring"),
            ("KMS_KEY", "key"),
            ("PORT", "not-a-port"),
        ]);
        let result = Config::from_lookup(lookup(&vars));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidVar { var: "PORT", .. })
        ));
    }

    #[test]
    fn test_key_version_name_built_from_config() {
        let vars = env(&[
            ("GOOGLE_CLOUD_PROJECT", "proj"),
            ("KMS_LOCATION", "europe-west1"),
            ("KMS_KEY_RING", "ring"),
            ("KMS_KEY", "key"),
            ("KMS_KEY_VERSION", "7"),
        ]);
        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(
            config.key_version_name().resource_name(),
            "projects/proj/locations/europe-west1/keyRings/ring/cryptoKeys/key/cryptoKeyVersions/7"
        );
    }
}
