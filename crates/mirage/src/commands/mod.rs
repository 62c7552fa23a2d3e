//! CLI command implementations

pub mod config;
pub mod extension;
pub mod profile;
pub mod rules;

use anyhow::{Context, Result};
use camino::Utf8Path;
use mirage_core::{HierarchicalConfigLoader, OutputFormat, Profile, RuntimeConfig};
use mirage_extensions::RuleRegistry;
use std::process::ExitCode;
use tracing::debug;

use crate::cli::Cli;

/// State shared by every command
pub struct CommandContext {
    /// Effective runtime configuration (CLI flags applied)
    pub config: RuntimeConfig,

    /// Where config.yaml was looked up
    pub config_dir: camino::Utf8PathBuf,
}

impl CommandContext {
    /// Load runtime configuration and apply global CLI flags
    pub fn load(cli: &Cli) -> Result<Self> {
        let loader = match &cli.config_dir {
            Some(dir) => HierarchicalConfigLoader::with_dir(dir.clone()),
            None => HierarchicalConfigLoader::new().context("Failed to locate config directory")?,
        };

        let mut config = loader
            .load_runtime_config()
            .context("Failed to load runtime configuration")?;

        if let Some(rules) = &cli.rules {
            config.rules.extra_rules_file = Some(rules.clone());
        }

        Ok(Self {
            config,
            config_dir: loader.config_dir().to_owned(),
        })
    }

    /// Whether to print JSON, from the flag or the configured default
    pub fn wants_json(&self, flag: bool) -> bool {
        flag || self.config.display.output_format == OutputFormat::Json
    }

    /// Built-in rules with the configured extra table merged over them
    pub fn rule_registry(&self) -> Result<RuleRegistry> {
        let mut registry = RuleRegistry::builtin().clone();

        if let Some(path) = &self.config.rules.extra_rules_file {
            let extra = RuleRegistry::from_file(path)
                .with_context(|| format!("Failed to load conflict rules from {}", path))?;
            let replaced = registry.merge(extra);
            debug!(
                "Merged rules from {} ({} replaced built-in entries)",
                path,
                replaced.len()
            );
        }

        Ok(registry)
    }
}

/// Read a profile JSON file
pub fn read_profile(path: &Utf8Path) -> Result<Profile> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    Profile::from_json(&content).with_context(|| format!("Failed to parse profile {}", path))
}

/// Write a profile as pretty JSON
pub fn write_profile(path: &Utf8Path, profile: &Profile) -> Result<()> {
    let json = profile.to_json_pretty()?;
    std::fs::write(path, json + "\n").with_context(|| format!("Failed to write {}", path))
}

/// Non-zero exit when a check fails
pub fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
