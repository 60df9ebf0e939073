//! Tool catalogue — builds the tool map from discovered actions and config.
//!
//! A build is a single synchronous pass with no I/O:
//! 1. filter actions through the allow-list,
//! 2. register configured custom tools (they claim their target action),
//! 3. register every remaining allowed action under a generated name.
//!
//! Names are made unique against a set owned by that one pass, so repeated
//! builds never interfere with each other.

use crate::naming::{ensure_unique, sanitize_action_name, strip_forbidden};
use crate::registry::{ActionDescriptor, ActionRegistry};
use crate::tools::access::AllowList;
use crate::tools::entry::ToolEntry;
use crate::types::{Config, Result};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Prefix of the broker's built-in node introspection actions.
pub const NODE_ACTION_PREFIX: &str = "$node.";

// =============================================================================
// Description synthesis
// =============================================================================

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Default description for a generated tool.
///
/// `$node.services` → "Get services information from the node.",
/// `users.list` → "List operation for the users service.",
/// `ping` → "Execute the ping action."
pub fn describe_action(action_name: &str) -> String {
    if let Some(topic) = action_name.strip_prefix(NODE_ACTION_PREFIX) {
        return format!("Get {} information from the node.", topic);
    }
    match action_name.rsplit_once('.') {
        Some((service, method)) if !service.is_empty() && !method.is_empty() => {
            format!("{} operation for the {} service.", capitalize(method), service)
        }
        _ => format!("Execute the {} action.", action_name),
    }
}

// =============================================================================
// Tool catalogue
// =============================================================================

/// Immutable result of one build: tool name → entry.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalogue {
    entries: HashMap<String, ToolEntry>,
}

impl ToolCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a tool by name.
    pub fn get(&self, tool_name: &str) -> Option<&ToolEntry> {
        self.entries.get(tool_name)
    }

    pub fn has_tool(&self, tool_name: &str) -> bool {
        self.entries.contains_key(tool_name)
    }

    /// Action a tool forwards to.
    pub fn action_for(&self, tool_name: &str) -> Option<&str> {
        self.entries.get(tool_name).map(ToolEntry::action)
    }

    /// All tool names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// All entries, sorted by tool name.
    pub fn list_entries(&self) -> Vec<&ToolEntry> {
        let mut entries: Vec<&ToolEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        entries
    }

    /// Snapshot copy of the tool map. Mutating it does not touch the catalogue.
    pub fn tools(&self) -> HashMap<String, ToolEntry> {
        self.entries.clone()
    }

    /// Protocol listing of every tool, sorted by name.
    pub fn describe(&self) -> Vec<Value> {
        self.list_entries().iter().map(|e| e.to_listing()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds a [`ToolCatalogue`] from an action snapshot and the configuration.
#[derive(Clone)]
pub struct CatalogueBuilder<'a> {
    config: &'a Config,
    registry: Arc<dyn ActionRegistry>,
}

impl<'a> CatalogueBuilder<'a> {
    pub fn new(config: &'a Config, registry: Arc<dyn ActionRegistry>) -> Self {
        Self { config, registry }
    }

    /// Run one build pass.
    ///
    /// A custom tool whose action is missing or not allowed is skipped with a
    /// warning. Failing to find a unique name aborts the whole build.
    pub fn build(&self, actions: &[ActionDescriptor]) -> Result<ToolCatalogue> {
        let allowed = AllowList::new(&self.config.allow).filter(actions);

        let mut used_names: HashSet<String> = HashSet::new();
        let mut claimed: HashSet<&str> = HashSet::new();
        let mut entries: HashMap<String, ToolEntry> = HashMap::new();

        for spec in &self.config.tools {
            let Some(action) = allowed.iter().find(|a| a.name == spec.action) else {
                tracing::warn!(
                    tool = %spec.name,
                    action = %spec.action,
                    "custom tool targets an action that is missing or not allowed; skipping"
                );
                continue;
            };

            let name = ensure_unique(&strip_forbidden(&spec.name), &used_names)?;
            claimed.insert(action.name.as_str());
            self.register(
                &mut entries,
                &mut used_names,
                name,
                action,
                spec.description.clone(),
                spec.params.clone(),
            );
        }
        let custom_count = entries.len();

        for action in &allowed {
            if claimed.contains(action.name.as_str()) {
                continue;
            }
            let name = ensure_unique(&sanitize_action_name(&action.name)?, &used_names)?;
            self.register(
                &mut entries,
                &mut used_names,
                name,
                action,
                describe_action(&action.name),
                Map::new(),
            );
        }

        tracing::info!(
            discovered = actions.len(),
            allowed = allowed.len(),
            custom = custom_count,
            tools = entries.len(),
            "built tool catalogue"
        );

        Ok(ToolCatalogue { entries })
    }

    fn register(
        &self,
        entries: &mut HashMap<String, ToolEntry>,
        used_names: &mut HashSet<String>,
        name: String,
        action: &ActionDescriptor,
        description: String,
        overrides: Map<String, Value>,
    ) {
        tracing::debug!(tool = %name, action = %action.name, "registered tool");
        used_names.insert(name.clone());
        let entry = ToolEntry::new(
            name.clone(),
            action,
            description,
            overrides,
            Arc::clone(&self.registry),
        );
        entries.insert(name, entry);
    }
}

impl std::fmt::Debug for CatalogueBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogueBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
