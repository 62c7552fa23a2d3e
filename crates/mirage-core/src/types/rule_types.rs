//! Conflict rule and conflict report types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How serious an extension conflict is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Sort rank; lower ranks are reported first
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// Area of the browser both extensions try to control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictCategory {
    AdBlocking,
    TrackerBlocking,
    ScriptBlocking,
    Fingerprint,
    Webrtc,
    Proxy,
    Cookies,
    Geolocation,
    Appearance,
}

impl std::fmt::Display for ConflictCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictCategory::AdBlocking => write!(f, "ad-blocking"),
            ConflictCategory::TrackerBlocking => write!(f, "tracker-blocking"),
            ConflictCategory::ScriptBlocking => write!(f, "script-blocking"),
            ConflictCategory::Fingerprint => write!(f, "fingerprint"),
            ConflictCategory::Webrtc => write!(f, "webrtc"),
            ConflictCategory::Proxy => write!(f, "proxy"),
            ConflictCategory::Cookies => write!(f, "cookies"),
            ConflictCategory::Geolocation => write!(f, "geolocation"),
            ConflictCategory::Appearance => write!(f, "appearance"),
        }
    }
}

/// Static conflict metadata declared for one extension name
///
/// A rule only speaks for the extension it is declared on: a pair (A, B)
/// is reported for A when A's rule lists B, independently of B's rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictRule {
    /// Extension names this one conflicts with
    pub conflicts: BTreeSet<String>,

    /// Human readable explanation
    pub reason: String,

    /// Remediation hints
    #[serde(default)]
    pub tips: Vec<String>,

    /// Affected area
    pub category: ConflictCategory,

    /// Severity of running both
    pub severity: Severity,

    /// Extension to keep when auto-resolving
    #[serde(default)]
    pub preferred_choice: Option<String>,

    /// What the user sees when the conflict is left alone
    #[serde(default)]
    pub impact: String,
}

/// A detected conflict for one enabled extension
///
/// Produced fresh on every detection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// Extension whose rule triggered
    pub extension: String,

    /// Co-enabled extensions listed in that rule
    pub conflicts_with: Vec<String>,

    pub reason: String,

    #[serde(default)]
    pub tips: Vec<String>,

    pub category: ConflictCategory,

    pub severity: Severity,

    #[serde(default)]
    pub impact: String,

    #[serde(default)]
    pub preferred_choice: Option<String>,
}

impl Conflict {
    /// Build a conflict record from the rule that triggered it
    pub fn from_rule(
        extension: impl Into<String>,
        conflicts_with: Vec<String>,
        rule: &ConflictRule,
    ) -> Self {
        Self {
            extension: extension.into(),
            conflicts_with,
            reason: rule.reason.clone(),
            tips: rule.tips.clone(),
            category: rule.category,
            severity: rule.severity,
            impact: rule.impact.clone(),
            preferred_choice: rule.preferred_choice.clone(),
        }
    }

    /// Whether `name` is the subject or one of the conflicting extensions
    pub fn involves(&self, name: &str) -> bool {
        self.extension == name || self.conflicts_with.iter().any(|n| n == name)
    }
}
