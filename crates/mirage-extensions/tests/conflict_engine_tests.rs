//! Conflict engine integration tests
//!
//! Tests detection, compatibility and auto-resolution against the built-in
//! rule table:
//! - The uBlock Origin / AdBlock Plus example
//! - Severity ordering across categories
//! - Disabling either side clears a pair
//! - Applying an auto-resolution clears its pair

mod common;

use common::*;
use mirage_core::Severity;
use mirage_extensions::{
    check_conflicts, get_auto_resolution, validate_extension_compatibility, ConflictDetector,
    MemoryResolutionStore, ResolutionStore, RuleRegistry,
};

#[test]
fn test_ublock_adblock_plus_example() {
    let extensions = enabled_list(&["uBlock Origin", "AdBlock Plus"]);

    let conflicts = check_conflicts(&extensions);

    assert_eq!(conflicts.len(), 1);
    let conflict = &conflicts[0];
    assert_eq!(conflict.extension, "uBlock Origin");
    assert_eq!(conflict.conflicts_with, vec!["AdBlock Plus".to_string()]);
    assert_eq!(conflict.severity, Severity::High);
    assert_eq!(conflict.preferred_choice.as_deref(), Some("uBlock Origin"));

    let resolution = get_auto_resolution(conflict).unwrap();
    assert_eq!(resolution.disable, vec!["AdBlock Plus".to_string()]);

    let resolved = resolution.apply(&extensions);
    assert!(resolved[0].enabled);
    assert!(!resolved[1].enabled);
    assert!(check_conflicts(&resolved).is_empty());
}

#[test]
fn test_severity_ordering_mixed_profile() {
    let extensions = enabled_list(&[
        "Dark Reader",
        "Night Eye",
        "Ghostery",
        "Privacy Badger",
        "uBlock Origin",
        "AdBlock Plus",
    ]);

    let conflicts = check_conflicts(&extensions);
    let severities: Vec<Severity> = conflicts.iter().map(|c| c.severity).collect();

    assert_eq!(
        severities,
        vec![Severity::High, Severity::Medium, Severity::Low]
    );
    assert_sorted_by_severity(&conflicts);
}

#[test]
fn test_disabling_either_side_clears_every_builtin_pair() {
    let registry = RuleRegistry::builtin();
    let detector = ConflictDetector::new(registry);

    for (name, rule) in registry.iter() {
        for other in &rule.conflicts {
            let extensions = enabled_list(&[name, other.as_str()]);
            assert!(
                !detector.check_conflicts(&extensions).is_empty(),
                "{} and {} should conflict",
                name,
                other
            );

            for side in [name, other.as_str()] {
                let disabled = disable_named(&extensions, side);
                assert_pair_clear(&detector.check_conflicts(&disabled), name, other);
            }
        }
    }
}

#[test]
fn test_auto_resolution_clears_every_builtin_pair() {
    let registry = RuleRegistry::builtin();
    let detector = ConflictDetector::new(registry);

    for (name, rule) in registry.iter() {
        for other in &rule.conflicts {
            let extensions = enabled_list(&[name, other.as_str()]);
            for conflict in detector.check_conflicts(&extensions) {
                let Some(resolution) = get_auto_resolution(&conflict) else {
                    assert!(rule.preferred_choice.is_none());
                    continue;
                };

                let resolved = resolution.apply(&extensions);
                assert_pair_clear(&detector.check_conflicts(&resolved), name, other);
            }
        }
    }
}

#[test]
fn test_full_blocker_stack_resolves() {
    let extensions = enabled_list(&[
        "uBlock Origin",
        "AdBlock Plus",
        "AdBlock",
        "AdGuard AdBlocker",
    ]);

    let conflicts = check_conflicts(&extensions);
    let ublock = conflicts
        .iter()
        .find(|c| c.extension == "uBlock Origin")
        .unwrap();
    assert_eq!(ublock.conflicts_with.len(), 3);

    let resolved = get_auto_resolution(ublock).unwrap().apply(&extensions);
    assert!(check_conflicts(&resolved).is_empty());
    assert_eq!(
        resolved.iter().filter(|ext| ext.enabled).count(),
        1,
        "only uBlock Origin stays on"
    );
}

#[test]
fn test_one_directional_declaration() {
    // Only uBlock Origin declares the pair, so it is the subject either way
    let conflicts = check_conflicts(&enabled_list(&["AdBlock Plus", "uBlock Origin"]));

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].extension, "uBlock Origin");
}

#[test]
fn test_no_preferred_choice_has_no_auto_resolution() {
    let conflicts = check_conflicts(&enabled_list(&["Canvas Fingerprint Defender", "CanvasBlocker"]));

    assert_eq!(conflicts.len(), 1);
    assert!(get_auto_resolution(&conflicts[0]).is_none());
}

#[test]
fn test_compatibility_matches_detection() {
    let current = ExtensionListBuilder::new()
        .enabled("Privacy Badger")
        .disabled("Disconnect")
        .build();
    let candidate = mirage_core::Extension::new("new", "Ghostery", "8.0");

    let report = validate_extension_compatibility(&current, &candidate);
    assert!(!report.is_valid);
    assert_eq!(report.conflicts, vec!["Privacy Badger".to_string()]);

    let mut after = current.clone();
    after.push(candidate);
    let conflicts = check_conflicts(&after);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].conflicts_with, report.conflicts);
}

#[test]
fn test_history_records_session() {
    let extensions = enabled_list(&["uBlock Origin", "AdBlock Plus", "Ghostery", "Disconnect"]);
    let mut store = MemoryResolutionStore::new();

    let mut current = extensions.clone();
    for conflict in check_conflicts(&extensions) {
        if let Some(resolution) = get_auto_resolution(&conflict) {
            current = resolution.apply(&current);
            store.save_resolution(&conflict, &resolution).unwrap();
        }
    }

    assert!(check_conflicts(&current).is_empty());
    let stats = store.conflict_stats().unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(store.auto_resolution_rate().unwrap(), 1.0);
}
