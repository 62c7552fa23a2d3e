//! Versioned JSON Schemas for profile documents
//!
//! Each schema version lives in `schemas/profile.v{N}.schema.json` and is
//! embedded at build time. The migrator validates an upgraded profile
//! against the schema of the version it ends at.

use crate::error::{Error, Result};
use jsonschema::Validator;
use rust_embed::RustEmbed;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

/// Embedded schema files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/schemas/"]
#[prefix = ""]
struct EmbeddedSchemas;

/// A compiled schema and the field list it requires
#[derive(Debug)]
struct VersionSchema {
    validator: Validator,
    required: Vec<String>,
}

/// Compiled profile schemas keyed by schema version
#[derive(Debug)]
pub struct ProfileSchemas {
    schemas: BTreeMap<u64, VersionSchema>,
}

/// Global schema set
static SCHEMAS: OnceLock<ProfileSchemas> = OnceLock::new();

impl ProfileSchemas {
    /// Compile the embedded schemas
    pub fn new() -> Result<Self> {
        let mut schemas = BTreeMap::new();

        for file in EmbeddedSchemas::iter() {
            let Some(version) = Self::version_from_file_name(&file) else {
                continue;
            };

            debug!("Loading embedded profile schema v{}", version);

            if let Some(content) = EmbeddedSchemas::get(&file) {
                let json_str = std::str::from_utf8(&content.data).map_err(|_| {
                    Error::invalid_config(format!("Invalid UTF-8 in schema: {}", file))
                })?;
                let schema_value: Value = serde_json::from_str(json_str)?;
                schemas.insert(version, Self::compile(version, &schema_value)?);
            }
        }

        Ok(Self { schemas })
    }

    /// Build a schema set from in-memory schema documents
    pub fn from_values(values: impl IntoIterator<Item = (u64, Value)>) -> Result<Self> {
        let mut schemas = BTreeMap::new();
        for (version, schema_value) in values {
            schemas.insert(version, Self::compile(version, &schema_value)?);
        }
        Ok(Self { schemas })
    }

    /// Get the global schema set
    pub fn global() -> &'static ProfileSchemas {
        SCHEMAS.get_or_init(|| {
            ProfileSchemas::new().expect("Failed to compile embedded profile schemas")
        })
    }

    fn compile(version: u64, schema_value: &Value) -> Result<VersionSchema> {
        let validator = jsonschema::validator_for(schema_value).map_err(|e| {
            Error::invalid_config(format!("Failed to compile profile schema v{}: {}", version, e))
        })?;

        let required = schema_value
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(VersionSchema {
            validator,
            required,
        })
    }

    /// `profile.v2.schema.json` -> `Some(2)`
    fn version_from_file_name(file: &str) -> Option<u64> {
        file.strip_prefix("profile.v")?
            .strip_suffix(".schema.json")?
            .parse()
            .ok()
    }

    /// Validate a profile document against the schema of `version`
    ///
    /// Returns one message per violation; an empty list means valid.
    pub fn validate(&self, value: &Value, version: u64) -> Result<Vec<String>> {
        let schema = self
            .schemas
            .get(&version)
            .ok_or_else(|| Error::schema_not_found(version))?;

        let errors = schema
            .validator
            .iter_errors(value)
            .map(|e| {
                let path = e.instance_path().to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{}: {}", path, e)
                }
            })
            .collect();

        Ok(errors)
    }

    /// Top-level fields required by the schema of `version`
    pub fn required_fields(&self, version: u64) -> Option<&[String]> {
        self.schemas.get(&version).map(|s| s.required.as_slice())
    }

    /// Check if a schema exists for `version`
    pub fn has_version(&self, version: u64) -> bool {
        self.schemas.contains_key(&version)
    }

    /// Known schema versions, ascending
    pub fn versions(&self) -> Vec<u64> {
        self.schemas.keys().copied().collect()
    }
}
