//! Error types for mirage-core

use thiserror::Error;

/// Result type alias using mirage-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Mirage
///
/// Field-level validation problems are not errors: they are reported as
/// strings on [`crate::migration::MigrationOutcome`] and
/// [`crate::validation::ValidationOutcome`]. Only states with no sane
/// default end up here.
#[derive(Error, Debug)]
pub enum Error {
    /// Profile was written by a newer schema than this build understands
    #[error("Unsupported profile version {found}: the newest supported version is {current}")]
    UnsupportedVersion { found: u64, current: u64 },

    /// Profile document is not a JSON object
    #[error("Invalid profile: {message}")]
    InvalidProfile { message: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// Schema not found
    #[error("Schema not found for profile version {version}")]
    SchemaNotFound { version: u64 },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unsupported version error
    pub fn unsupported_version(found: u64, current: u64) -> Self {
        Self::UnsupportedVersion { found, current }
    }

    /// Create an invalid profile error
    pub fn invalid_profile(message: impl Into<String>) -> Self {
        Self::InvalidProfile {
            message: message.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a schema not found error
    pub fn schema_not_found(version: u64) -> Self {
        Self::SchemaNotFound { version }
    }

    /// Whether this error means the profile came from a newer schema
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, Self::UnsupportedVersion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_version_message() {
        let err = Error::unsupported_version(7, 2);
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('2'));
        assert!(err.is_unsupported_version());
    }

    #[test]
    fn test_invalid_profile_is_not_version_error() {
        let err = Error::invalid_profile("expected an object");
        assert!(!err.is_unsupported_version());
        assert_eq!(err.to_string(), "Invalid profile: expected an object");
    }
}
