//! Browser profile document
//!
//! Profiles arrive from the UI with partial data and are persisted as JSON,
//! so the document keeps its JSON object shape. Unknown keys survive every
//! migration untouched; typed accessors cover the fields the core reasons
//! about.

use crate::error::{Error, Result};
use crate::types::Extension;
use crate::utils::json_type_name;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A browser profile record (JSON object)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(Map<String, Value>);

impl Profile {
    /// Create an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing JSON object
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Convert a JSON value, rejecting anything that is not an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::invalid_profile(format!(
                "expected a JSON object, found {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Parse a profile from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Borrow the underlying object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the underlying object
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Copy into a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Look up a top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a top-level field, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Builder-style field setter
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a field that is present and not null
    pub fn present(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Raw `version` field
    pub fn raw_version(&self) -> Option<&Value> {
        self.present("version")
    }

    /// `version` when it is a non-negative integer
    pub fn version(&self) -> Option<u64> {
        self.raw_version().and_then(Value::as_u64)
    }

    /// Profile id
    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(Value::as_str)
    }

    /// Profile display name
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    /// Operating system label
    pub fn os(&self) -> Option<&str> {
        self.get("os").and_then(Value::as_str)
    }

    /// Parse the `extensions` array
    ///
    /// A missing or null field yields an empty list.
    pub fn extensions(&self) -> Result<Vec<Extension>> {
        match self.present("extensions") {
            None => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value.clone())?),
        }
    }

    /// Replace the `extensions` array
    pub fn set_extensions(&mut self, extensions: &[Extension]) -> Result<()> {
        let value = serde_json::to_value(extensions)?;
        self.insert("extensions", value);
        Ok(())
    }

    /// Serialize as pretty JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}

impl From<Map<String, Value>> for Profile {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Profile {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = Profile::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, Error::InvalidProfile { .. }));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_version_accessor() {
        assert_eq!(Profile::new().version(), None);
        assert_eq!(Profile::new().with("version", json!(1)).version(), Some(1));
        assert_eq!(Profile::new().with("version", json!(-1)).version(), None);
        assert_eq!(Profile::new().with("version", json!("2")).version(), None);
        assert!(Profile::new().with("version", Value::Null).raw_version().is_none());
    }

    #[test]
    fn test_extensions_missing_is_empty() {
        let profile = Profile::new().with("extensions", Value::Null);
        assert!(profile.extensions().unwrap().is_empty());
    }

    #[test]
    fn test_extensions_roundtrip() {
        let mut profile = Profile::new();
        let extensions = vec![Extension::new("a", "NoScript", "11.4")];
        profile.set_extensions(&extensions).unwrap();

        assert_eq!(profile.extensions().unwrap(), extensions);
    }

    #[test]
    fn test_extensions_wrong_shape_is_error() {
        let profile = Profile::new().with("extensions", json!("none"));
        assert!(matches!(
            profile.extensions().unwrap_err(),
            Error::JsonParse(_)
        ));
    }

    #[test]
    fn test_transparent_serde() {
        let profile = Profile::from_json(r#"{"name":"X","custom":{"a":1}}"#).unwrap();
        assert_eq!(profile.name(), Some("X"));
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value, json!({"name": "X", "custom": {"a": 1}}));
    }
}
