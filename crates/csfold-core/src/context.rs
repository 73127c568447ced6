//! Run-scoped collections of `using` directives and declared namespaces
//!
//! A fresh [`MergeContext`] is built for every merge run and discarded once the
//! document has been assembled.

use crate::classify::UsingDirective;
use std::collections::{BTreeMap, BTreeSet};

/// Usings and namespaces collected across all files of one project
#[derive(Debug, Clone, Default)]
pub struct MergeContext {
    /// Usings keyed by their normalized text, so equal statements collapse
    usings: BTreeMap<String, UsingDirective>,
    /// Namespaces declared by the project
    namespaces: BTreeSet<String>,
}

impl MergeContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context seeded with the project's root namespace.
    /// A blank root namespace is ignored.
    pub fn with_root_namespace(root_namespace: &str) -> Self {
        let mut context = Self::new();
        context.add_namespace(root_namespace);
        context
    }

    /// Record a `using` directive; duplicates by exact text are ignored
    pub fn add_using(&mut self, directive: UsingDirective) {
        self.usings.entry(directive.text()).or_insert(directive);
    }

    /// Record a declared namespace
    pub fn add_namespace(&mut self, namespace: &str) {
        let namespace = namespace.trim();
        if !namespace.is_empty() {
            self.namespaces.insert(namespace.to_string());
        }
    }

    /// All distinct usings, in ordinal order of their text
    pub fn usings(&self) -> impl Iterator<Item = &UsingDirective> {
        self.usings.values()
    }

    /// All collected namespaces
    pub fn namespaces(&self) -> &BTreeSet<String> {
        &self.namespaces
    }

    /// Check whether a namespace belongs to the project
    pub fn is_internal(&self, namespace: &str) -> bool {
        self.namespaces
            .iter()
            .any(|ns| is_same_or_child(namespace, ns))
    }

    /// Usings that do not reference a project namespace, sorted by ordinal
    /// comparison of their normalized text
    pub fn external_usings(&self) -> Vec<String> {
        self.usings
            .iter()
            .filter(|(_, directive)| !self.is_internal(&directive.namespace))
            .map(|(text, _)| text.clone())
            .collect()
    }
}

/// `namespace == parent` or `namespace` starts with `parent.`
fn is_same_or_child(namespace: &str, parent: &str) -> bool {
    match namespace.strip_prefix(parent) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
