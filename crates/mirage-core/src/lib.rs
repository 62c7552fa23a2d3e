//! # mirage-core
//!
//! Core library for Mirage browser profiles providing:
//! - Profile, extension and conflict rule types
//! - Versioned profile JSON Schemas
//! - Forward-only schema migration with default filling
//! - Business-rule validation before a profile is saved
//! - Layered runtime configuration

pub mod config;
pub mod error;
pub mod migration;
pub mod schema;
pub mod types;
pub mod utils;
pub mod validation;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use migration::{
    migrate_to_version, validate_and_upgrade, MigrationOutcome, SchemaMigrator, CURRENT_VERSION,
};
pub use schema::ProfileSchemas;
pub use types::{
    Conflict, ConflictCategory, ConflictRule, DisplayConfig, Extension, OutputFormat, Profile,
    RulesConfig, RuntimeConfig, Severity,
};
pub use utils::get_home_dir;
pub use validation::{validate_profile, ProfileValidator, ValidationOutcome};
