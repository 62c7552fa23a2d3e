//! Conflict rule registry
//!
//! Rules are data, keyed by extension name. The built-in table ships inside
//! the binary (`rules/conflict-rules.yaml`) and is parsed once per process.
//! Extra tables can be loaded from YAML and merged over it; entries in the
//! overlay replace built-in entries with the same name.

use crate::error::{Error, Result};
use camino::Utf8Path;
use mirage_core::ConflictRule;
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Embedded rule tables
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/rules/"]
#[prefix = ""]
struct EmbeddedRules;

/// File name of the built-in rule table
pub const BUILTIN_RULES_FILE: &str = "conflict-rules.yaml";

static BUILTIN: OnceLock<RuleRegistry> = OnceLock::new();

/// On-disk shape of a rule table
#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    rules: BTreeMap<String, ConflictRule>,
}

/// Read-only lookup table of conflict rules
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleRegistry {
    rules: BTreeMap<String, ConflictRule>,
}

impl RuleRegistry {
    /// Create an empty registry (nothing ever conflicts)
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the embedded rule table
    pub fn load_builtin() -> Result<Self> {
        let file = EmbeddedRules::get(BUILTIN_RULES_FILE).ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("embedded rule table {} is missing", BUILTIN_RULES_FILE),
            ))
        })?;
        Self::parse(decode_table(&file.data, BUILTIN_RULES_FILE)?, BUILTIN_RULES_FILE)
    }

    /// Built-in registry shared for the process lifetime
    pub fn builtin() -> &'static RuleRegistry {
        BUILTIN.get_or_init(|| {
            RuleRegistry::load_builtin().expect("Failed to parse embedded conflict rules")
        })
    }

    /// Parse a rule table from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        Self::parse(content, "<inline>")
    }

    /// Load a rule table from a YAML file
    pub fn from_file(path: &Utf8Path) -> Result<Self> {
        debug!("Loading conflict rules from {}", path);
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path.as_str())
    }

    fn parse(content: &str, origin: &str) -> Result<Self> {
        let file: RulesFile = if content.trim().is_empty() {
            RulesFile {
                rules: BTreeMap::new(),
            }
        } else {
            serde_yaml_ng::from_str(content).map_err(|e| Error::rule_parse(origin, e))?
        };

        for (name, rule) in &file.rules {
            check_rule(name, rule)?;
        }

        info!("Loaded {} conflict rules from {}", file.rules.len(), origin);
        Ok(Self { rules: file.rules })
    }

    /// Add or replace a single rule
    pub fn with_rule(mut self, name: impl Into<String>, rule: ConflictRule) -> Result<Self> {
        let name = name.into();
        check_rule(&name, &rule)?;
        self.rules.insert(name, rule);
        Ok(self)
    }

    /// Merge another registry over this one
    ///
    /// Returns the names whose rule was replaced.
    pub fn merge(&mut self, overlay: RuleRegistry) -> Vec<String> {
        let mut replaced = Vec::new();
        for (name, rule) in overlay.rules {
            if self.rules.insert(name.clone(), rule).is_some() {
                replaced.push(name);
            }
        }
        if !replaced.is_empty() {
            debug!("Overlay replaced rules: {}", replaced.join(", "));
        }
        replaced
    }

    /// Rule declared for an extension name
    ///
    /// An empty or unknown name has no rule, which means it never conflicts.
    pub fn rule_for(&self, name: &str) -> Option<&ConflictRule> {
        if name.is_empty() {
            return None;
        }
        self.rules.get(name)
    }

    /// Declared extension names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    /// Iterate rules in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConflictRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn decode_table<'b>(bytes: &'b [u8], origin: &str) -> Result<&'b str> {
    std::str::from_utf8(bytes).map_err(|e| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("rule table {} is not valid UTF-8: {}", origin, e),
        ))
    })
}

fn check_rule(name: &str, rule: &ConflictRule) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_rule(name, "extension name is empty"));
    }
    if rule.conflicts.is_empty() {
        return Err(Error::invalid_rule(name, "conflicts list is empty"));
    }
    if rule.conflicts.contains(name) {
        return Err(Error::invalid_rule(name, "an extension cannot conflict with itself"));
    }
    if let Some(preferred) = &rule.preferred_choice {
        if preferred != name && !rule.conflicts.contains(preferred) {
            return Err(Error::invalid_rule(
                name,
                format!(
                    "preferredChoice '{}' is neither the extension nor one of its conflicts",
                    preferred
                ),
            ));
        }
    }
    Ok(())
}
