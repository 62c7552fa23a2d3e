//! Type definitions for Mirage profiles, extensions, conflict rules, and runtime config

mod extension_types;
mod profile_types;
mod rule_types;
mod runtime_config;

pub use extension_types::*;
pub use profile_types::*;
pub use rule_types::*;
pub use runtime_config::*;
