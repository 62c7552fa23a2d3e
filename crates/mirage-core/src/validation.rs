//! Profile business-rule validation
//!
//! Runs the schema migrator first and stops there when the upgraded profile
//! does not satisfy the schema. Otherwise every field rule runs against the
//! upgraded profile and all violations are reported together.

use crate::error::Result;
use crate::migration::{MigrationOutcome, SchemaMigrator};
use crate::types::Profile;
use crate::utils::is_blank;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// Lowest valid proxy port
pub const MIN_PORT: i64 = 1;

/// Highest valid proxy port
pub const MAX_PORT: i64 = 65535;

/// Final accept/reject verdict for a profile
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,

    /// Upgraded profile, returned even when invalid
    pub profile: Profile,

    pub errors: Vec<String>,
}

impl From<MigrationOutcome> for ValidationOutcome {
    fn from(outcome: MigrationOutcome) -> Self {
        Self {
            is_valid: outcome.is_valid,
            profile: outcome.profile,
            errors: outcome.errors,
        }
    }
}

/// Validates profiles before they are persisted
pub struct ProfileValidator<'a> {
    migrator: SchemaMigrator<'a>,
}

impl<'a> ProfileValidator<'a> {
    /// Create a validator around a migrator
    pub fn new(migrator: SchemaMigrator<'a>) -> Self {
        Self { migrator }
    }

    /// Create a validator backed by the embedded schemas
    pub fn global() -> ProfileValidator<'static> {
        ProfileValidator::new(SchemaMigrator::global())
    }

    /// Upgrade a profile and check its business rules
    ///
    /// Fails only for profiles from a newer schema version.
    pub fn validate_profile(&self, profile: &Profile) -> Result<ValidationOutcome> {
        let migrated = self.migrator.validate_and_upgrade(profile)?;
        if !migrated.is_valid {
            return Ok(migrated.into());
        }

        let upgraded = migrated.profile;
        let mut errors = Vec::new();

        check_identity(&upgraded, &mut errors);
        if let Some(proxy) = upgraded.present("proxy") {
            check_proxy(proxy, &mut errors);
        }
        if let Some(resolution) = upgraded
            .present("browser")
            .and_then(|browser| browser.get("resolution"))
            .filter(|resolution| !resolution.is_null())
        {
            check_resolution(resolution, &mut errors);
        }
        if let Some(Value::Array(extensions)) = upgraded.present("extensions") {
            check_extensions(extensions, &mut errors);
        }

        if !errors.is_empty() {
            debug!("Profile rejected with {} error(s)", errors.len());
        }

        Ok(ValidationOutcome {
            is_valid: errors.is_empty(),
            profile: upgraded,
            errors,
        })
    }
}

/// Validate a profile using the embedded schemas
pub fn validate_profile(profile: &Profile) -> Result<ValidationOutcome> {
    ProfileValidator::global().validate_profile(profile)
}

fn check_identity(profile: &Profile, errors: &mut Vec<String>) {
    match profile.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => {}
        _ => errors.push("Profile name is required".to_string()),
    }

    if is_blank(profile.get("os")) {
        errors.push("Operating system is required".to_string());
    }
}

fn check_proxy(proxy: &Value, errors: &mut Vec<String>) {
    let Some(proxy) = proxy.as_object() else {
        errors.push("Proxy settings must be an object".to_string());
        return;
    };

    if is_blank(proxy.get("ip")) {
        errors.push("Proxy IP is required".to_string());
    }

    let port = proxy.get("port");
    if is_blank(port) {
        errors.push("Proxy port is required".to_string());
    } else if let Some(port) = port {
        match parse_integer(port) {
            Some(p) if (MIN_PORT..=MAX_PORT).contains(&p) => {}
            _ => errors.push(format!(
                "Invalid proxy port {}: must be an integer between {} and {}",
                display_value(port),
                MIN_PORT,
                MAX_PORT
            )),
        }
    }
}

fn check_resolution(resolution: &Value, errors: &mut Vec<String>) {
    let Some(resolution) = resolution.as_object() else {
        errors.push("Browser resolution must be an object".to_string());
        return;
    };

    for dimension in ["width", "height"] {
        check_dimension(resolution, dimension, errors);
    }
}

fn check_dimension(resolution: &Map<String, Value>, dimension: &str, errors: &mut Vec<String>) {
    let Some(value) = resolution.get(dimension).filter(|v| !v.is_null()) else {
        return;
    };

    if !parse_number(value).is_some_and(|n| n > 0.0) {
        errors.push(format!(
            "Invalid resolution {} {}: must be a positive number",
            dimension,
            display_value(value)
        ));
    }
}

fn check_extensions(extensions: &[Value], errors: &mut Vec<String>) {
    let mut seen = HashSet::new();

    for (index, extension) in extensions.iter().enumerate() {
        let Some(extension) = extension.as_object() else {
            errors.push(format!("Extension #{} must be an object", index + 1));
            continue;
        };

        if is_blank(extension.get("name")) {
            errors.push(format!("Extension #{} is missing a name", index + 1));
        }

        match extension.get("id").and_then(Value::as_str).map(str::trim) {
            Some(id) if !id.is_empty() => {
                if !seen.insert(id) {
                    errors.push(format!("Duplicate extension id: {}", id));
                }
            }
            _ => errors.push(format!("Extension #{} is missing an id", index + 1)),
        }
    }
}

/// Integer from a JSON number or numeric string
fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Finite number from a JSON number or numeric string
fn parse_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}
