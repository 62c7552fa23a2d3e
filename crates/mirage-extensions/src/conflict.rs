//! Conflict detection over an extension list
//!
//! Only enabled extensions take part. Each enabled extension is checked
//! against its own rule; the other side of a pair is never consulted, so a
//! conflict is reported for whichever extension declares it.

use crate::registry::RuleRegistry;
use mirage_core::{Conflict, Extension};
use tracing::debug;

/// Finds active conflicts using a rule registry
#[derive(Debug, Clone, Copy)]
pub struct ConflictDetector<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> ConflictDetector<'a> {
    /// Create a detector over a registry
    pub fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    /// Create a detector over the built-in rules
    pub fn builtin() -> ConflictDetector<'static> {
        ConflictDetector::new(RuleRegistry::builtin())
    }

    /// Find all conflicts among the enabled extensions
    ///
    /// One record per declaring extension, listing every co-enabled name its
    /// rule mentions in list order. Output is sorted high to medium to low;
    /// ties keep encounter order.
    pub fn check_conflicts(&self, extensions: &[Extension]) -> Vec<Conflict> {
        let enabled: Vec<&Extension> = extensions.iter().filter(|ext| ext.enabled).collect();
        let mut conflicts = Vec::new();

        for (index, ext) in enabled.iter().enumerate() {
            let Some(rule) = self.registry.rule_for(&ext.name) else {
                continue;
            };

            let mut conflicts_with: Vec<String> = Vec::new();
            for (other_index, other) in enabled.iter().enumerate() {
                if other_index == index || !rule.conflicts.contains(&other.name) {
                    continue;
                }
                if !conflicts_with.contains(&other.name) {
                    conflicts_with.push(other.name.clone());
                }
            }

            if !conflicts_with.is_empty() {
                debug!(
                    "{} conflicts with {} ({})",
                    ext.name,
                    conflicts_with.join(", "),
                    rule.severity
                );
                conflicts.push(Conflict::from_rule(ext.name.clone(), conflicts_with, rule));
            }
        }

        // sort_by_key is stable
        conflicts.sort_by_key(|conflict| conflict.severity.rank());
        conflicts
    }
}

/// Find conflicts using the built-in rules
pub fn check_conflicts(extensions: &[Extension]) -> Vec<Conflict> {
    ConflictDetector::builtin().check_conflicts(extensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirage_core::Severity;

    fn ext(name: &str) -> Extension {
        Extension::new(name.to_lowercase().replace(' ', "-"), name, "1.0.0")
    }

    fn registry() -> RuleRegistry {
        RuleRegistry::from_yaml(
            r#"
rules:
  A:
    conflicts: [B, C]
    reason: a
    category: ad-blocking
    severity: low
  B:
    conflicts: [C]
    reason: b
    category: proxy
    severity: high
  D:
    conflicts: [E]
    reason: d
    category: webrtc
    severity: low
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(check_conflicts(&[]).is_empty());
    }

    #[test]
    fn test_disabled_extensions_never_conflict() {
        let registry = registry();
        let detector = ConflictDetector::new(&registry);
        let extensions = vec![ext("A"), ext("B").with_enabled(false)];

        assert!(detector.check_conflicts(&extensions).is_empty());
    }

    #[test]
    fn test_lists_all_co_enabled_names_in_list_order() {
        let registry = registry();
        let detector = ConflictDetector::new(&registry);
        let extensions = vec![ext("C"), ext("A"), ext("B")];

        let conflicts = detector.check_conflicts(&extensions);
        let a = conflicts.iter().find(|c| c.extension == "A").unwrap();
        assert_eq!(a.conflicts_with, vec!["C".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_sorted_by_severity_stable() {
        let registry = registry();
        let detector = ConflictDetector::new(&registry);
        let extensions = vec![ext("D"), ext("E"), ext("A"), ext("B"), ext("C")];

        let conflicts = detector.check_conflicts(&extensions);
        let order: Vec<(&str, Severity)> = conflicts
            .iter()
            .map(|c| (c.extension.as_str(), c.severity))
            .collect();

        assert_eq!(
            order,
            vec![
                ("B", Severity::High),
                ("D", Severity::Low),
                ("A", Severity::Low),
            ]
        );
    }

    #[test]
    fn test_detection_is_one_directional() {
        let registry = registry();
        let detector = ConflictDetector::new(&registry);

        let conflicts = detector.check_conflicts(&[ext("E"), ext("D")]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].extension, "D");
        assert_eq!(conflicts[0].conflicts_with, vec!["E".to_string()]);
    }

    #[test]
    fn test_duplicate_names_listed_once() {
        let registry = registry();
        let detector = ConflictDetector::new(&registry);
        let extensions = vec![ext("D"), ext("E"), ext("E")];

        let conflicts = detector.check_conflicts(&extensions);
        assert_eq!(conflicts[0].conflicts_with, vec!["E".to_string()]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let extensions = vec![ext("uBlock Origin"), ext("AdBlock Plus")];
        let before = extensions.clone();
        let _ = check_conflicts(&extensions);
        assert_eq!(extensions, before);
    }
}
