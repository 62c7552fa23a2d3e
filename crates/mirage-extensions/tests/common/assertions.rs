//! Assertion helpers for conflict results

#![allow(dead_code)]

use mirage_core::{Conflict, Severity};

/// Assert no reported conflict involves both names
pub fn assert_pair_clear(conflicts: &[Conflict], a: &str, b: &str) {
    for conflict in conflicts {
        assert!(
            !(conflict.involves(a) && conflict.involves(b)),
            "{} and {} still conflict: {:?}",
            a,
            b,
            conflict
        );
    }
}

/// Assert severities never go back up the ranking
pub fn assert_sorted_by_severity(conflicts: &[Conflict]) {
    let ranks: Vec<u8> = conflicts.iter().map(|c| c.severity.rank()).collect();
    assert!(
        ranks.windows(2).all(|w| w[0] <= w[1]),
        "conflicts not sorted by severity: {:?}",
        conflicts.iter().map(|c| c.severity).collect::<Vec<Severity>>()
    );
}
