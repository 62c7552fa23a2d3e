//! Conflict resolutions
//!
//! A resolution is a plan for which extensions to switch off. It never
//! touches the caller's list; [`Resolution::apply`] returns a new one.

use mirage_core::{Conflict, Extension};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a resolution came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionKind {
    /// Derived from the rule's preferred choice
    Auto,
    /// User picked one extension to disable
    Disable,
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionKind::Auto => write!(f, "auto"),
            ResolutionKind::Disable => write!(f, "disable"),
        }
    }
}

/// Which extensions to keep and which to disable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    #[serde(rename = "type")]
    pub kind: ResolutionKind,

    /// Extensions left enabled
    #[serde(default)]
    pub keep: Vec<String>,

    /// Extensions to switch off
    pub disable: Vec<String>,
}

impl Resolution {
    /// Manual resolution that disables one extension
    pub fn disable(name: impl Into<String>) -> Self {
        Self {
            kind: ResolutionKind::Disable,
            keep: Vec::new(),
            disable: vec![name.into()],
        }
    }

    pub fn is_auto(&self) -> bool {
        self.kind == ResolutionKind::Auto
    }

    /// Return a copy of `extensions` with the planned ones disabled
    ///
    /// Matching is by name; entries not named stay exactly as they were.
    pub fn apply(&self, extensions: &[Extension]) -> Vec<Extension> {
        extensions
            .iter()
            .map(|ext| {
                if self.disable.contains(&ext.name) {
                    ext.clone().with_enabled(false)
                } else {
                    ext.clone()
                }
            })
            .collect()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.keep.is_empty() {
            write!(f, "keep {}, ", self.keep.join(", "))?;
        }
        write!(f, "disable {}", self.disable.join(", "))
    }
}

/// Suggested fix for a conflict, when its rule names a preferred choice
///
/// When the conflict's own extension is preferred, every extension it
/// conflicts with is disabled. Otherwise the conflict's own extension is
/// disabled and the ones it conflicts with stay enabled.
pub fn get_auto_resolution(conflict: &Conflict) -> Option<Resolution> {
    let preferred = conflict.preferred_choice.as_deref()?;

    let resolution = if preferred == conflict.extension {
        Resolution {
            kind: ResolutionKind::Auto,
            keep: vec![conflict.extension.clone()],
            disable: conflict.conflicts_with.clone(),
        }
    } else {
        Resolution {
            kind: ResolutionKind::Auto,
            keep: conflict.conflicts_with.clone(),
            disable: vec![conflict.extension.clone()],
        }
    };

    Some(resolution)
}
