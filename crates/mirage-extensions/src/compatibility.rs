//! Pre-flight compatibility check for a single extension
//!
//! Called before an extension is added or enabled, with the list as it is
//! now. Nothing is mutated; the caller decides whether to go ahead.

use crate::registry::RuleRegistry;
use mirage_core::Extension;
use serde::Serialize;

/// Result of checking one candidate extension
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    pub is_valid: bool,

    /// Enabled extensions the candidate's rule lists
    pub conflicts: Vec<String>,

    /// Rule reason, set only when the candidate is rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CompatibilityReport {
    fn compatible() -> Self {
        Self {
            is_valid: true,
            conflicts: Vec::new(),
            reason: None,
        }
    }
}

/// Checks candidates against the currently enabled extensions
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityValidator<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> CompatibilityValidator<'a> {
    pub fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    /// Validator over the built-in rules
    pub fn builtin() -> CompatibilityValidator<'static> {
        CompatibilityValidator::new(RuleRegistry::builtin())
    }

    /// Check whether `candidate` can join `current`
    pub fn validate(&self, current: &[Extension], candidate: &Extension) -> CompatibilityReport {
        let Some(rule) = self.registry.rule_for(&candidate.name) else {
            return CompatibilityReport::compatible();
        };

        let mut conflicts: Vec<String> = Vec::new();
        for ext in current.iter().filter(|ext| ext.enabled) {
            if rule.conflicts.contains(&ext.name) && !conflicts.contains(&ext.name) {
                conflicts.push(ext.name.clone());
            }
        }

        if conflicts.is_empty() {
            return CompatibilityReport::compatible();
        }

        CompatibilityReport {
            is_valid: false,
            conflicts,
            reason: Some(rule.reason.clone()),
        }
    }
}

/// Check a candidate using the built-in rules
pub fn validate_extension_compatibility(
    current: &[Extension],
    candidate: &Extension,
) -> CompatibilityReport {
    CompatibilityValidator::builtin().validate(current, candidate)
}
