//! Profile schema migration
//!
//! A profile's `version` is a state in `0..=CURRENT_VERSION`. Migrations run
//! strictly forward one version at a time, from `version + 1` through
//! [`CURRENT_VERSION`]. Every step only adds missing fields and stamps the
//! new version, so re-running a step on an already migrated profile changes
//! nothing.
//!
//! Defaults never override caller data. `browser`, `browser.hardwareSpecs`
//! and `browser.resolution` merge key by key; every other default applies
//! only when the whole field is absent or null.

use crate::error::{Error, Result};
use crate::schema::ProfileSchemas;
use crate::types::Profile;
use crate::utils::json_type_name;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

/// Schema version written by this build
pub const CURRENT_VERSION: u64 = 2;

/// Status given to profiles that never had one
pub const DEFAULT_STATUS: &str = "ready";

type Object = Map<String, Value>;

/// One forward migration step
struct Migration {
    /// Version this step produces
    version: u64,
    description: &'static str,
    apply: fn(Object) -> Object,
}

/// Migration chain; entry `i` produces version `i + 1`
const MIGRATIONS: [Migration; CURRENT_VERSION as usize] = [
    Migration {
        version: 1,
        description: "identity, status, creation time and browser defaults",
        apply: migrate_v1,
    },
    Migration {
        version: 2,
        description: "profile settings and extension list",
        apply: migrate_v2,
    },
];

/// Result of running the migration chain and schema check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationOutcome {
    /// Upgraded profile, returned even when invalid
    pub profile: Profile,

    /// True when the upgraded profile satisfies the current schema
    pub is_valid: bool,

    /// Schema violations
    pub errors: Vec<String>,
}

/// Upgrades profiles to [`CURRENT_VERSION`] and checks them against the
/// current schema
pub struct SchemaMigrator<'a> {
    schemas: &'a ProfileSchemas,
}

impl<'a> SchemaMigrator<'a> {
    /// Create a migrator backed by a schema set
    pub fn new(schemas: &'a ProfileSchemas) -> Self {
        Self { schemas }
    }

    /// Create a migrator backed by the embedded schemas
    pub fn global() -> SchemaMigrator<'static> {
        SchemaMigrator::new(ProfileSchemas::global())
    }

    /// Migrate a profile to the current version and validate it
    ///
    /// Fails only when the profile declares a version newer than
    /// [`CURRENT_VERSION`]; in that case nothing is transformed.
    pub fn validate_and_upgrade(&self, profile: &Profile) -> Result<MigrationOutcome> {
        let from = starting_version(profile)?;

        let mut upgraded = profile.clone();
        if from < CURRENT_VERSION {
            info!(
                "Migrating profile {} from v{} to v{}",
                profile.id().unwrap_or("<new>"),
                from,
                CURRENT_VERSION
            );
            for version in (from + 1)..=CURRENT_VERSION {
                upgraded = migrate_to_version(upgraded, version)?;
            }
        }

        let errors = self
            .schemas
            .validate(&upgraded.to_value(), CURRENT_VERSION)?;

        if !errors.is_empty() {
            debug!("Profile failed schema check with {} error(s)", errors.len());
        }

        Ok(MigrationOutcome {
            profile: upgraded,
            is_valid: errors.is_empty(),
            errors,
        })
    }
}

/// Migrate and validate using the embedded schemas
pub fn validate_and_upgrade(profile: &Profile) -> Result<MigrationOutcome> {
    SchemaMigrator::global().validate_and_upgrade(profile)
}

/// Apply the single step that moves a profile from `version - 1` to `version`
pub fn migrate_to_version(profile: Profile, version: u64) -> Result<Profile> {
    let step = version
        .checked_sub(1)
        .and_then(|index| MIGRATIONS.get(index as usize))
        .ok_or_else(|| Error::unsupported_version(version, CURRENT_VERSION))?;

    debug!("Applying migration v{}: {}", step.version, step.description);

    let mut object = (step.apply)(profile.into_map());
    object.insert("version".to_string(), json!(step.version));
    Ok(Profile::from_map(object))
}

/// Version the chain starts from
///
/// Absent or null means 0. Numbers and numeric strings above
/// [`CURRENT_VERSION`] are fatal however they are written (`3.0`, `"3"`).
/// Negative, fractional and non-numeric values are treated as 0 so the
/// whole chain runs.
fn starting_version(profile: &Profile) -> Result<u64> {
    let Some(value) = profile.raw_version() else {
        return Ok(0);
    };
    if let Some(version) = value.as_u64() {
        return check_not_future(version).map(|()| version);
    }

    match numeric_version(value) {
        Some(number) if number > CURRENT_VERSION as f64 => {
            // saturating cast; 3.5 reports as 4
            Err(Error::unsupported_version(number.ceil() as u64, CURRENT_VERSION))
        }
        Some(number) if number >= 0.0 && number.fract() == 0.0 => Ok(number as u64),
        _ => {
            warn!(
                "Ignoring non-integer profile version {} ({})",
                value,
                json_type_name(value)
            );
            Ok(0)
        }
    }
}

fn check_not_future(version: u64) -> Result<()> {
    if version > CURRENT_VERSION {
        return Err(Error::unsupported_version(version, CURRENT_VERSION));
    }
    Ok(())
}

/// Finite number from a JSON number or numeric string
fn numeric_version(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn migrate_v1(mut profile: Object) -> Object {
    ensure(&mut profile, "id", || json!(uuid::Uuid::new_v4().to_string()));
    ensure(&mut profile, "status", || json!(DEFAULT_STATUS));
    ensure(&mut profile, "createdAt", || {
        json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    });

    let browser = merge_browser(profile.remove("browser"));
    profile.insert("browser".to_string(), browser);
    profile
}

fn migrate_v2(mut profile: Object) -> Object {
    ensure(&mut profile, "settings", || Value::Object(settings_defaults()));
    ensure(&mut profile, "extensions", || json!([]));
    profile
}

/// Insert `key` when it is absent or null
fn ensure(profile: &mut Object, key: &str, default: impl FnOnce() -> Value) {
    let missing = profile.get(key).map_or(true, Value::is_null);
    if missing {
        profile.insert(key.to_string(), default());
    }
}

/// Defaults spread under caller values; caller keys win
fn spread(defaults: Object, overrides: Object) -> Object {
    let mut merged = defaults;
    merged.extend(overrides);
    merged
}

/// Merge one object-valued field against its defaults
///
/// Absent or null takes the defaults, an object is spread over them, and
/// any other caller value is kept as-is for the schema check to report.
fn merge_object_field(defaults: Object, caller: Option<Value>, path: &str) -> Value {
    match caller {
        None | Some(Value::Null) => Value::Object(defaults),
        Some(Value::Object(overrides)) => Value::Object(spread(defaults, overrides)),
        Some(other) => {
            warn!(
                "Keeping {} value for {} instead of applying defaults",
                json_type_name(&other),
                path
            );
            other
        }
    }
}

fn merge_browser(caller: Option<Value>) -> Value {
    let mut defaults = browser_defaults();
    let hardware_defaults = take_object(&mut defaults, "hardwareSpecs");
    let resolution_defaults = take_object(&mut defaults, "resolution");

    let mut browser = match merge_object_field(defaults, caller, "browser") {
        Value::Object(browser) => browser,
        other => return other,
    };

    let hardware = merge_object_field(
        hardware_defaults,
        browser.remove("hardwareSpecs"),
        "browser.hardwareSpecs",
    );
    browser.insert("hardwareSpecs".to_string(), hardware);

    let resolution = merge_object_field(
        resolution_defaults,
        browser.remove("resolution"),
        "browser.resolution",
    );
    browser.insert("resolution".to_string(), resolution);

    Value::Object(browser)
}

fn take_object(object: &mut Object, key: &str) -> Object {
    match object.remove(key) {
        Some(Value::Object(inner)) => inner,
        _ => Object::new(),
    }
}

fn as_object(value: Value) -> Object {
    match value {
        Value::Object(object) => object,
        _ => Object::new(),
    }
}

fn browser_defaults() -> Object {
    as_object(json!({
        "type": "chromium",
        "version": "latest",
        "userAgent": "",
        "language": "en-US",
        "doNotTrack": false,
        "hardwareSpecs": {
            "cpuCores": 4,
            "memory": 8,
            "gpuVendor": "auto",
            "gpuRenderer": "auto"
        },
        "resolution": {
            "width": 1920,
            "height": 1080,
            "colorDepth": 24,
            "pixelRatio": 1
        },
        "fingerprint": {
            "canvas": "noise",
            "webgl": "noise",
            "audioContext": "noise",
            "clientRects": "noise",
            "fonts": "system",
            "mediaDevices": "masked"
        }
    }))
}

fn settings_defaults() -> Object {
    as_object(json!({
        "startUrl": "about:blank",
        "saveHistory": true,
        "saveCookies": true,
        "saveLocalStorage": true,
        "blockImages": false,
        "blockAudio": false,
        "restoreTabs": true
    }))
}
