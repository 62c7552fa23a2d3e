//! Extension conflict engine for Mirage
//!
//! This crate handles:
//! - Conflict rule tables (built-in and user supplied)
//! - Conflict detection over a profile's extension list
//! - Pre-flight compatibility checks for a single extension
//! - Auto-resolution suggestions
//! - The resolution history interface

pub mod compatibility;
pub mod conflict;
pub mod error;
pub mod history;
pub mod registry;
pub mod resolution;

pub use compatibility::{validate_extension_compatibility, CompatibilityReport, CompatibilityValidator};
pub use conflict::{check_conflicts, ConflictDetector};
pub use error::{Error, Result};
pub use history::{ConflictStats, MemoryResolutionStore, ResolutionRecord, ResolutionStore};
pub use registry::{RuleRegistry, BUILTIN_RULES_FILE};
pub use resolution::{get_auto_resolution, Resolution, ResolutionKind};
