//! Error types for mirage-extensions

use thiserror::Error;

/// Result type alias using mirage-extensions' Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading conflict rule tables
///
/// Detection, compatibility checks and auto-resolution never fail; only
/// building a [`crate::RuleRegistry`] from external data can.
#[derive(Error, Debug)]
pub enum Error {
    /// Rule table is not valid YAML or does not match the rule shape
    #[error("Failed to parse conflict rules from {origin}: {source}")]
    RuleParse {
        origin: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Rule parsed but is not usable
    #[error("Invalid conflict rule for '{name}': {message}")]
    InvalidRule { name: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a rule parse error
    pub fn rule_parse(origin: impl Into<String>, source: serde_yaml_ng::Error) -> Self {
        Self::RuleParse {
            origin: origin.into(),
            source,
        }
    }

    /// Create an invalid rule error
    pub fn invalid_rule(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRule {
            name: name.into(),
            message: message.into(),
        }
    }
}
