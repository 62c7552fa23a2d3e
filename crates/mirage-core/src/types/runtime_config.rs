//! Runtime configuration types
//!
//! These control how the CLI loads conflict rules and prints results. The
//! validation and conflict engines themselves take no configuration.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Conflict rule sources
    #[serde(default)]
    pub rules: RulesConfig,

    /// Display and output settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Conflict rule sources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RulesConfig {
    /// YAML rule table merged over the built-in rules
    #[serde(default)]
    pub extra_rules_file: Option<Utf8PathBuf>,
}

/// Display and output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DisplayConfig {
    /// Default output format when no flag is given
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Print auto-resolution suggestions next to conflicts
    #[serde(default = "default_true")]
    pub show_auto_resolutions: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            show_auto_resolutions: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Output format for CLI reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Partial runtime configuration as written in a user config file
///
/// Every field is optional so a file only overrides what it names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfigOverlay {
    #[serde(default)]
    pub rules: Option<RulesOverlay>,

    #[serde(default)]
    pub display: Option<DisplayOverlay>,
}

/// Partial [`RulesConfig`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RulesOverlay {
    #[serde(default)]
    pub extra_rules_file: Option<Utf8PathBuf>,
}

/// Partial [`DisplayConfig`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DisplayOverlay {
    #[serde(default)]
    pub output_format: Option<OutputFormat>,

    #[serde(default)]
    pub show_auto_resolutions: Option<bool>,
}
