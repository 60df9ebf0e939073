//! Action allow-list — decides which actions may become tools.
//!
//! Patterns are `"*"` (everything), `"prefix*"` (literal prefix match,
//! typically `"users.*"`) or an exact action name. An action matching no
//! pattern is silently left out of the catalogue.

use crate::registry::ActionDescriptor;

/// A single compiled allow-pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowPattern {
    Any,
    Prefix(String),
    Exact(String),
}

impl AllowPattern {
    pub fn parse(pattern: &str) -> Self {
        if pattern == "*" {
            AllowPattern::Any
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            AllowPattern::Prefix(prefix.to_string())
        } else {
            AllowPattern::Exact(pattern.to_string())
        }
    }

    pub fn matches(&self, action_name: &str) -> bool {
        match self {
            AllowPattern::Any => true,
            AllowPattern::Prefix(prefix) => action_name.starts_with(prefix.as_str()),
            AllowPattern::Exact(name) => action_name == name,
        }
    }
}

/// Ordered set of allow-patterns. An empty list allows nothing.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    patterns: Vec<AllowPattern>,
}

impl AllowList {
    pub fn new(patterns: &[String]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| AllowPattern::parse(p)).collect(),
        }
    }

    /// Allow-list accepting every action.
    pub fn allow_all() -> Self {
        Self {
            patterns: vec![AllowPattern::Any],
        }
    }

    /// Check whether an action name matches at least one pattern.
    pub fn is_allowed(&self, action_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(action_name))
    }

    /// Keep allowed actions, preserving registry order.
    pub fn filter<'a>(&self, actions: &'a [ActionDescriptor]) -> Vec<&'a ActionDescriptor> {
        actions.iter().filter(|a| self.is_allowed(&a.name)).collect()
    }
}
