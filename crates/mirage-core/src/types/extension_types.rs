//! Browser extension type definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Browser extension attached to a profile
///
/// Identity is `id`; conflict rules key on `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    /// Unique identifier within a profile
    #[serde(default)]
    pub id: String,

    /// Display name, also the conflict rule key
    #[serde(default)]
    pub name: String,

    /// Extension version string
    #[serde(default)]
    pub version: String,

    /// Whether the extension is currently enabled
    #[serde(default)]
    pub enabled: bool,

    /// Free-form extension settings
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl Extension {
    /// Create an enabled extension with empty settings
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            enabled: true,
            settings: Map::new(),
        }
    }

    /// Return a copy with the enabled flag set
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Return a copy with a single setting inserted
    pub fn with_setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }
}

/// Names of the enabled extensions, in list order
pub fn enabled_names(extensions: &[Extension]) -> Vec<&str> {
    extensions
        .iter()
        .filter(|ext| ext.enabled)
        .map(|ext| ext.name.as_str())
        .collect()
}
