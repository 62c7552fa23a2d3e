//! Builders for extension lists

#![allow(dead_code)]

use mirage_core::Extension;

/// Fluent builder for an extension list
#[derive(Default)]
pub struct ExtensionListBuilder {
    extensions: Vec<Extension>,
}

impl ExtensionListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enabled extension; the id is derived from the position
    pub fn enabled(mut self, name: &str) -> Self {
        let id = format!("ext-{}", self.extensions.len() + 1);
        self.extensions.push(Extension::new(id, name, "1.0.0"));
        self
    }

    /// Add a disabled extension
    pub fn disabled(mut self, name: &str) -> Self {
        let id = format!("ext-{}", self.extensions.len() + 1);
        self.extensions
            .push(Extension::new(id, name, "1.0.0").with_enabled(false));
        self
    }

    pub fn build(self) -> Vec<Extension> {
        self.extensions
    }
}

/// Enabled extensions with the given names
pub fn enabled_list(names: &[&str]) -> Vec<Extension> {
    names
        .iter()
        .fold(ExtensionListBuilder::new(), |builder, name| builder.enabled(name))
        .build()
}

/// Set `enabled = false` on every entry with this name
pub fn disable_named(extensions: &[Extension], name: &str) -> Vec<Extension> {
    extensions
        .iter()
        .map(|ext| {
            if ext.name == name {
                ext.clone().with_enabled(false)
            } else {
                ext.clone()
            }
        })
        .collect()
}
