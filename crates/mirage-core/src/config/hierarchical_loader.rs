//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.mirage/config.yaml)
//! 3. Environment variables (MIRAGE_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::{RuntimeConfig, RuntimeConfigOverlay};
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// User configuration file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a loader rooted at ~/.mirage
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the standard config directory (~/.mirage)
    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = get_home_dir()
            .ok_or_else(|| Error::invalid_config("Could not determine home directory"))?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|_| Error::invalid_config("Home directory path is not valid UTF-8"))?;

        Ok(home.join(".mirage"))
    }

    /// Load runtime configuration with hierarchical precedence
    pub fn load_runtime_config(&self) -> Result<RuntimeConfig> {
        // Start with embedded defaults
        let mut config = Self::load_embedded_config::<RuntimeConfig>("runtime-defaults.yaml")?;

        let user_config_path = self.config_dir.join(CONFIG_FILE_NAME);
        if user_config_path.exists() {
            debug!("Loading user config from {}", user_config_path);
            let overlay = self.load_yaml_file::<RuntimeConfigOverlay>(&user_config_path)?;
            config = Self::merge_runtime_config(config, overlay);
        }

        config = self.apply_env_overrides(config)?;

        Ok(config)
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        let config: T = serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })?;

        Ok(config)
    }

    /// Load a YAML file and parse it
    fn load_yaml_file<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        // An empty file parses as null; treat it like an empty mapping
        if content.trim().is_empty() {
            return serde_yaml_ng::from_str("{}").map_err(Error::from);
        }
        let config: T = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Apply a user overlay; only the fields it names change
    fn merge_runtime_config(mut base: RuntimeConfig, overlay: RuntimeConfigOverlay) -> RuntimeConfig {
        if let Some(rules) = overlay.rules {
            if rules.extra_rules_file.is_some() {
                base.rules.extra_rules_file = rules.extra_rules_file;
            }
        }

        if let Some(display) = overlay.display {
            if let Some(format) = display.output_format {
                base.display.output_format = format;
            }
            if let Some(show) = display.show_auto_resolutions {
                base.display.show_auto_resolutions = show;
            }
        }

        base
    }

    /// Apply environment variable overrides to runtime config
    fn apply_env_overrides(&self, mut config: RuntimeConfig) -> Result<RuntimeConfig> {
        if let Ok(val) = env::var("MIRAGE_RULES_FILE") {
            if !val.trim().is_empty() {
                config.rules.extra_rules_file = Some(Utf8PathBuf::from(val));
            }
        }

        if let Ok(val) = env::var("MIRAGE_OUTPUT_FORMAT") {
            config.display.output_format = val.parse().map_err(|e| {
                Error::invalid_config(format!("MIRAGE_OUTPUT_FORMAT: {}", e))
            })?;
        }

        if let Ok(val) = env::var("MIRAGE_SHOW_AUTO_RESOLUTIONS") {
            config.display.show_auto_resolutions = val.parse().map_err(|_| {
                Error::invalid_config("MIRAGE_SHOW_AUTO_RESOLUTIONS must be true or false")
            })?;
        }

        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutputFormat;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_temp_loader() -> (HierarchicalConfigLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_dir =
            Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("Invalid UTF-8 path");
        let loader = HierarchicalConfigLoader::with_dir(config_dir);
        (loader, temp_dir)
    }

    #[test]
    #[serial]
    fn test_load_runtime_config_defaults() {
        let (loader, _temp) = create_temp_loader();
        let config = loader.load_runtime_config().unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_runtime_config_from_file() {
        let (loader, _temp) = create_temp_loader();

        let config_content = r#"
rules:
  extra-rules-file: /etc/mirage/rules.yaml
display:
  output-format: json
"#;
        let config_path = loader.config_dir().join(CONFIG_FILE_NAME);
        fs::write(&config_path, config_content).unwrap();

        let config = loader.load_runtime_config().unwrap();
        assert_eq!(
            config.rules.extra_rules_file,
            Some(Utf8PathBuf::from("/etc/mirage/rules.yaml"))
        );
        assert_eq!(config.display.output_format, OutputFormat::Json);
        // Not named in the file, keeps the embedded default
        assert!(config.display.show_auto_resolutions);
    }

    #[test]
    #[serial]
    fn test_empty_user_config_is_ignored() {
        let (loader, _temp) = create_temp_loader();
        fs::write(loader.config_dir().join(CONFIG_FILE_NAME), "").unwrap();

        let config = loader.load_runtime_config().unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    #[serial]
    fn test_malformed_user_config_is_error() {
        let (loader, _temp) = create_temp_loader();
        fs::write(
            loader.config_dir().join(CONFIG_FILE_NAME),
            "display:\n  output-format: xml\n",
        )
        .unwrap();

        let err = loader.load_runtime_config().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let (loader, _temp) = create_temp_loader();

        env::set_var("MIRAGE_RULES_FILE", "/tmp/rules.yaml");
        env::set_var("MIRAGE_OUTPUT_FORMAT", "json");
        env::set_var("MIRAGE_SHOW_AUTO_RESOLUTIONS", "false");

        let config = loader.load_runtime_config();

        env::remove_var("MIRAGE_RULES_FILE");
        env::remove_var("MIRAGE_OUTPUT_FORMAT");
        env::remove_var("MIRAGE_SHOW_AUTO_RESOLUTIONS");

        let config = config.unwrap();
        assert_eq!(
            config.rules.extra_rules_file,
            Some(Utf8PathBuf::from("/tmp/rules.yaml"))
        );
        assert_eq!(config.display.output_format, OutputFormat::Json);
        assert!(!config.display.show_auto_resolutions);
    }

    #[test]
    #[serial]
    fn test_invalid_env_override_is_error() {
        let (loader, _temp) = create_temp_loader();

        env::set_var("MIRAGE_SHOW_AUTO_RESOLUTIONS", "sometimes");
        let result = loader.load_runtime_config();
        env::remove_var("MIRAGE_SHOW_AUTO_RESOLUTIONS");

        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_merge_runtime_config() {
        let overlay: RuntimeConfigOverlay =
            serde_yaml_ng::from_str("display:\n  show-auto-resolutions: false\n").unwrap();

        let merged = HierarchicalConfigLoader::merge_runtime_config(RuntimeConfig::default(), overlay);
        assert!(!merged.display.show_auto_resolutions);
        assert_eq!(merged.display.output_format, OutputFormat::Text);
        assert!(merged.rules.extra_rules_file.is_none());
    }
}
